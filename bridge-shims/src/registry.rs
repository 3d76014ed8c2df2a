//! Process-wide Module Registry

use bridge_traits::module::{ModuleLocator, ServicesModule};
use std::collections::HashMap;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Name-keyed table of module adapters.
///
/// Adapter crates that link the real dependency register an adapter under
/// the module's well-known name during startup. The core looks it up once,
/// at façade initialization; registering afterwards has no effect on an
/// already initialized façade.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, Arc<dyn ServicesModule>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry shared by the whole process.
    pub fn global() -> &'static ModuleRegistry {
        static GLOBAL: OnceLock<ModuleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModuleRegistry::new)
    }

    /// Register `module` under `name`, returning the adapter it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        module: Arc<dyn ServicesModule>,
    ) -> Option<Arc<dyn ServicesModule>> {
        let name = name.into();
        debug!(module = %name, "Registering module adapter");
        self.modules.write().insert(name, module)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn ServicesModule>> {
        self.modules.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl ModuleLocator for ModuleRegistry {
    fn locate(&self, name: &str) -> Option<Arc<dyn ServicesModule>> {
        self.modules.read().get(name).cloned()
    }
}

impl ModuleLocator for &'static ModuleRegistry {
    fn locate(&self, name: &str) -> Option<Arc<dyn ServicesModule>> {
        (**self).locate(name)
    }
}
