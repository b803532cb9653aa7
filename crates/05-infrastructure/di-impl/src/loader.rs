//! 基于链接期声明的模块加载器

use crate::declaration::{declarations, ProviderDeclaration};
use crate::locator::ServiceLocator;
use di_abstractions::{Aggregator, ModuleLoader};
use infrastructure_common::{DiscoveryError, DiscoveryResult};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// 与进程级注册表配套的加载器
static GLOBAL_DECLARATION_LOADER: Lazy<DeclarationLoader> = Lazy::new(DeclarationLoader::new);

/// 声明加载器
///
/// “加载模块”即注册 `module_path` 等于该模块或位于其内联子模块中的所有声明。
/// 每条声明在同一加载器内只注册一次，只有注册成功后才记为已加载。
///
/// 已加载记录不区分注册表，一个加载器应只服务于一个注册表；
/// [`DeclarationLoader::global`] 对应 [`ServiceLocator::global`]。
pub struct DeclarationLoader {
    declarations: Vec<&'static ProviderDeclaration>,
    /// 已注册声明在 `declarations` 中的下标
    loaded: Mutex<HashSet<usize>>,
}

impl DeclarationLoader {
    /// 使用链接进程序的全部声明
    pub fn new() -> Self {
        Self::with_declarations(declarations().collect())
    }

    /// 进程级加载器，记录进程内已加载的声明
    pub fn global() -> &'static DeclarationLoader {
        &GLOBAL_DECLARATION_LOADER
    }

    /// 使用指定的声明集合
    pub fn with_declarations(declarations: Vec<&'static ProviderDeclaration>) -> Self {
        Self {
            declarations,
            loaded: Mutex::new(HashSet::new()),
        }
    }

    /// 加载单个模块，返回新注册的提供者数量
    ///
    /// 模块中没有任何已链接的声明时返回 [`DiscoveryError::ModuleNotLinked`]。
    pub fn load(&self, module_path: &str, registry: &ServiceLocator) -> DiscoveryResult<usize> {
        let matched: Vec<usize> = self
            .declarations
            .iter()
            .enumerate()
            .filter(|(_, declaration)| declaration.belongs_to(module_path))
            .map(|(index, _)| index)
            .collect();
        if matched.is_empty() {
            error!("模块 {} 中没有已链接的提供者声明", module_path);
            return Err(DiscoveryError::ModuleNotLinked {
                module: module_path.to_string(),
            });
        }

        let mut loaded = self.loaded.lock();
        let mut registered = 0;
        for index in matched {
            if loaded.contains(&index) {
                continue;
            }
            let declaration = self.declarations[index];
            debug!(
                "注册提供者: {} -> {} (限定符: '{}')",
                declaration.implementation,
                declaration.capability(),
                declaration.qualifier
            );
            declaration
                .register(registry)
                .map_err(|source| DiscoveryError::Registration {
                    module: module_path.to_string(),
                    source,
                })?;
            loaded.insert(index);
            registered += 1;
        }

        if registered == 0 {
            debug!("模块已加载, 跳过: {}", module_path);
        }
        Ok(registered)
    }

    /// 不经过文件发现，直接注册全部尚未注册的声明
    pub fn register_all(&self, registry: &ServiceLocator) -> DiscoveryResult<usize> {
        let mut loaded = self.loaded.lock();
        let mut registered = 0;
        for (index, declaration) in self.declarations.iter().enumerate() {
            if loaded.contains(&index) {
                continue;
            }
            declaration
                .register(registry)
                .map_err(|source| DiscoveryError::Registration {
                    module: declaration.module_path.to_string(),
                    source,
                })?;
            loaded.insert(index);
            registered += 1;
        }
        info!("已注册全部声明, 共 {} 个提供者", registered);
        Ok(registered)
    }

    /// 模块中的声明是否已全部注册
    pub fn is_loaded(&self, module_path: &str) -> bool {
        let loaded = self.loaded.lock();
        let mut matched = self
            .declarations
            .iter()
            .enumerate()
            .filter(|(_, declaration)| declaration.belongs_to(module_path))
            .peekable();
        matched.peek().is_some() && matched.all(|(index, _)| loaded.contains(&index))
    }
}

impl Default for DeclarationLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for DeclarationLoader {
    type Target = ServiceLocator;

    fn load_module(&self, aggregator: &Aggregator, target: &ServiceLocator) -> DiscoveryResult<usize> {
        debug!("加载聚合清单: {} ({})", aggregator.package, aggregator.location.display());
        let mut registered = 0;
        for module in &aggregator.modules {
            registered += self.load(module, target)?;
        }
        Ok(registered)
    }
}
