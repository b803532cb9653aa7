use crate::greeter::Greeter;
use provider_macros::service_provider;

#[service_provider(dyn Greeter, qualifier = "formal", constructor = FormalGreeter::new)]
#[derive(Debug)]
pub struct FormalGreeter {
    title: String,
}

impl FormalGreeter {
    pub fn new() -> Self {
        Self {
            title: "Dear".to_string(),
        }
    }
}

impl Greeter for FormalGreeter {
    fn greet(&self, name: &str) -> String {
        format!("{} {}, good day.", self.title, name)
    }
}
