//! # Façade Configuration
//!
//! Configuration for binding the optional external module.
//!
//! ## Overview
//!
//! A [`FacadeConfig`] names the module to bind, says where to look for it,
//! and optionally carries a diagnostic backend to install before binding
//! starts. It is built with [`FacadeConfig::builder`], which validates the
//! result and fails fast with an actionable message when something required
//! is missing.
//!
//! ## Required Dependencies
//!
//! - `ModuleLocator` - finds the module adapter by name
//!
//! When the `shims` feature is enabled, the process-wide
//! `bridge_shims::ModuleRegistry` is used if no locator is provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::FacadeConfig;
//! use std::sync::Arc;
//!
//! let config = FacadeConfig::builder()
//!     .module_locator(Arc::new(MyLocator))
//!     .diagnostic_backend(Arc::new(MyLogcatBackend))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{DiagnosticBackend, ModuleLocator};
use std::sync::Arc;

/// Well-known name of the module the façade binds by default.
pub const DEFAULT_MODULE_NAME: &str = "com.google.android.gms.common.GooglePlayServicesUtil";

/// Configuration for initializing the façade.
#[derive(Clone)]
pub struct FacadeConfig {
    /// Name the external module is located by
    pub module_name: String,

    /// Where the module adapter is looked up (required)
    pub module_locator: Arc<dyn ModuleLocator>,

    /// Backend installed on the process-wide diagnostic sink before binding
    pub diagnostic_backend: Option<Arc<dyn DiagnosticBackend>>,
}

impl std::fmt::Debug for FacadeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacadeConfig")
            .field("module_name", &self.module_name)
            .field("module_locator", &"ModuleLocator { ... }")
            .field(
                "diagnostic_backend",
                &self
                    .diagnostic_backend
                    .as_ref()
                    .map(|_| "DiagnosticBackend { ... }"),
            )
            .finish()
    }
}

impl FacadeConfig {
    /// Creates a new builder for constructing a `FacadeConfig`.
    pub fn builder() -> FacadeConfigBuilder {
        FacadeConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.module_name.trim().is_empty() {
            return Err(Error::Config("Module name cannot be empty".to_string()));
        }

        if self.module_name.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "Module name '{}' must not contain whitespace",
                self.module_name
            )));
        }

        Ok(())
    }
}

#[cfg(not(feature = "shims"))]
fn module_locator_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "ModuleLocator".to_string(),
        message: "A ModuleLocator is required to find the external module. \
                 Enable the 'shims' feature to use the process-wide ModuleRegistry, \
                 or inject a locator with .module_locator()."
            .to_string(),
    }
}

#[cfg(feature = "shims")]
fn provide_default_module_locator() -> Result<Arc<dyn ModuleLocator>> {
    use bridge_shims::ModuleRegistry;

    let locator: Arc<dyn ModuleLocator> = Arc::new(ModuleRegistry::global());
    Ok(locator)
}

#[cfg(not(feature = "shims"))]
fn provide_default_module_locator() -> Result<Arc<dyn ModuleLocator>> {
    Err(module_locator_missing_error())
}

/// Builder for constructing [`FacadeConfig`] instances.
#[derive(Default)]
pub struct FacadeConfigBuilder {
    module_name: Option<String>,
    module_locator: Option<Arc<dyn ModuleLocator>>,
    diagnostic_backend: Option<Arc<dyn DiagnosticBackend>>,
}

impl FacadeConfigBuilder {
    /// Overrides the module name (defaults to [`DEFAULT_MODULE_NAME`]).
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Sets the locator used to find the module adapter.
    pub fn module_locator(mut self, locator: Arc<dyn ModuleLocator>) -> Self {
        self.module_locator = Some(locator);
        self
    }

    /// Sets a diagnostic backend to install before binding.
    pub fn diagnostic_backend(mut self, backend: Arc<dyn DiagnosticBackend>) -> Self {
        self.diagnostic_backend = Some(backend);
        self
    }

    /// Builds the final `FacadeConfig` instance.
    ///
    /// # Errors
    ///
    /// - `CapabilityMissing` if no locator was given and no default exists
    /// - `Config` if the module name is invalid
    pub fn build(self) -> Result<FacadeConfig> {
        let module_locator = match self.module_locator {
            Some(locator) => locator,
            None => provide_default_module_locator()?,
        };

        let config = FacadeConfig {
            module_name: self
                .module_name
                .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string()),
            module_locator,
            diagnostic_backend: self.diagnostic_backend,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_shims::MemoryBackend;
    use bridge_traits::ServicesModule;

    struct NoModules;

    impl ModuleLocator for NoModules {
        fn locate(&self, _name: &str) -> Option<Arc<dyn ServicesModule>> {
            None
        }
    }

    #[test]
    fn test_builder_with_locator_uses_default_name() {
        let config = FacadeConfig::builder()
            .module_locator(Arc::new(NoModules))
            .build()
            .unwrap();

        assert_eq!(config.module_name, DEFAULT_MODULE_NAME);
        assert!(config.diagnostic_backend.is_none());
    }

    #[test]
    fn test_builder_overrides_name_and_backend() {
        let config = FacadeConfig::builder()
            .module_name("com.example.Services")
            .module_locator(Arc::new(NoModules))
            .diagnostic_backend(Arc::new(MemoryBackend::new()))
            .build()
            .unwrap();

        assert_eq!(config.module_name, "com.example.Services");
        assert!(config.diagnostic_backend.is_some());
    }

    #[test]
    fn test_builder_rejects_empty_module_name() {
        let result = FacadeConfig::builder()
            .module_name("  ")
            .module_locator(Arc::new(NoModules))
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_whitespace_in_module_name() {
        let result = FacadeConfig::builder()
            .module_name("com.example Services")
            .module_locator(Arc::new(NoModules))
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[cfg(not(feature = "shims"))]
    #[test]
    fn test_builder_requires_locator() {
        let result = FacadeConfig::builder().build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "ModuleLocator");
            }
            other => panic!("expected CapabilityMissing, got {other:?}"),
        }
    }

    #[cfg(feature = "shims")]
    #[test]
    fn test_builder_defaults_to_global_registry() {
        let config = FacadeConfig::builder().build().unwrap();
        assert!(config.module_locator.locate("not.registered.Anywhere").is_none());
    }

    #[test]
    fn test_debug_hides_trait_objects() {
        let config = FacadeConfig::builder()
            .module_locator(Arc::new(NoModules))
            .build()
            .unwrap();

        let rendered = format!("{config:?}");
        assert!(rendered.contains("ModuleLocator { ... }"));
        assert!(rendered.contains(DEFAULT_MODULE_NAME));
    }
}
