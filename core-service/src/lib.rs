//! Optional dependency façade over the Google Play services utility module.
//!
//! [`PlayServicesFacade`] binds the external module once and then proxies its
//! operations. Operations the module does not provide return a documented
//! sentinel instead of failing, so callers never need to know in advance
//! which version of the module, if any, is installed.
//!
//! Most hosts use the process-wide façade: call [`install`] early with a
//! [`FacadeConfig`], or let [`facade`] bind with the default configuration on
//! first use. With the `shims` feature the default configuration looks the
//! module up in `bridge_shims::ModuleRegistry::global()`.
//!
//! ```ignore
//! use bridge_shims::{ModuleRegistry, StaticModule};
//!
//! ModuleRegistry::global().register(
//!     core_service::DEFAULT_MODULE_NAME,
//!     Arc::new(StaticModule::builder().error_string(|code| Ok(Some(format!("E{code}")))).build()),
//! );
//!
//! let services = core_service::facade()?;
//! assert_eq!(services.error_string(3)?.as_deref(), Some("E3"));
//! ```

pub mod constants;
pub mod error;
pub mod facade;
pub mod report;
pub mod resolution;
pub mod status;


pub use constants::{ConfigurationConstant, ConstantKey, ModuleConstants, Provenance};
pub use core_runtime::config::{FacadeConfig, DEFAULT_MODULE_NAME};
pub use error::{CoreError, Result};
pub use facade::PlayServicesFacade;
pub use report::BindingReport;
pub use resolution::{Operation, ResolutionTable, ResolvedOperation};
pub use status::ServiceStatus;

#[cfg(feature = "shims")]
pub use bridge_shims::{MemoryBackend, ModuleRegistry, StaticModule};

use bridge_traits::diagnostics::Severity;
use core_runtime::diagnostics::{self, TAG};
use std::sync::{Arc, OnceLock};

/// Initialization failure, kept so every later caller sees the same error.
#[derive(Debug, Clone)]
struct InitFailure {
    module: String,
    reason: String,
}

impl InitFailure {
    fn from_error(module: &str, err: &CoreError) -> Self {
        match err {
            CoreError::InitializationFailed { module, reason } => Self {
                module: module.clone(),
                reason: reason.clone(),
            },
            other => Self {
                module: module.to_string(),
                reason: other.to_string(),
            },
        }
    }

    fn to_error(&self) -> CoreError {
        CoreError::InitializationFailed {
            module: self.module.clone(),
            reason: self.reason.clone(),
        }
    }
}

type Bound = std::result::Result<Arc<PlayServicesFacade>, InitFailure>;

static FACADE: OnceLock<Bound> = OnceLock::new();

fn bind(config: &FacadeConfig) -> Bound {
    PlayServicesFacade::initialize(config)
        .map(Arc::new)
        .map_err(|err| InitFailure::from_error(&config.module_name, &err))
}

fn unwrap_bound(bound: &Bound) -> Result<Arc<PlayServicesFacade>> {
    bound.as_ref().map(Arc::clone).map_err(InitFailure::to_error)
}

/// Bind the process-wide façade with `config`.
///
/// Only the first call to `install` or [`facade`] binds; later calls return
/// the result of that first attempt and ignore their configuration. A failed
/// binding is not retried.
pub fn install(config: FacadeConfig) -> Result<Arc<PlayServicesFacade>> {
    let mut bound_here = false;
    let bound = FACADE.get_or_init(|| {
        bound_here = true;
        bind(&config)
    });

    if !bound_here {
        diagnostics::log(
            Severity::Warn,
            TAG,
            "Façade already initialized, ignoring the new configuration",
        );
    }

    unwrap_bound(bound)
}

/// The process-wide façade, bound with the default configuration on first use.
pub fn facade() -> Result<Arc<PlayServicesFacade>> {
    let bound = FACADE.get_or_init(|| match FacadeConfig::builder().build() {
        Ok(config) => bind(&config),
        Err(err) => Err(InitFailure::from_error(
            DEFAULT_MODULE_NAME,
            &CoreError::from(err),
        )),
    });

    unwrap_bound(bound)
}
