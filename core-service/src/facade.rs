//! # Play Services Façade
//!
//! Stable entry point for the optional external module.
//!
//! ## Overview
//!
//! The façade binds the module once, through [`crate::install`] or
//! [`crate::facade`]:
//!
//! 1. The module is located by name. If it is not there, initialization
//!    fails with [`CoreError::InitializationFailed`].
//! 2. Constants are copied from the module's declared surface. Missing ones
//!    keep their documented defaults.
//! 3. Every proxied operation is resolved by name and parameter shape.
//!    Missing ones are recorded as absent.
//!
//! A module that is present but declares a constant or operation with the
//! wrong shape is incompatible, which is as fatal as a missing module.
//!
//! After that the façade is immutable. An operation that did not resolve
//! returns its sentinel without touching the module; one that did forwards
//! its arguments unchanged and returns the module's result, or
//! [`CoreError::Invocation`] if the module fails.

use std::fmt;
use std::sync::Arc;

use bridge_traits::diagnostics::{Cause, Severity};
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::host::{Activity, CancelListener, Context, Dialog, PendingIntent, Resources};
use bridge_traits::module::ServicesModule;
use core_runtime::config::FacadeConfig;
use core_runtime::diagnostics::{self, TAG};

use crate::constants::ModuleConstants;
use crate::error::{CoreError, Result};
use crate::report::BindingReport;
use crate::resolution::{Operation, ResolutionTable};
use crate::status::{ServiceStatus, UNAVAILABLE_STATUS};

/// The bound external module.
///
/// Instances come only from [`crate::install`] and [`crate::facade`], so a
/// process binds at most once:
///
/// ```compile_fail
/// let config = core_service::FacadeConfig::builder().build().unwrap();
/// let _ = core_service::PlayServicesFacade::initialize(&config);
/// ```
pub struct PlayServicesFacade {
    module_name: String,
    module: Arc<dyn ServicesModule>,
    constants: ModuleConstants,
    resolution: ResolutionTable,
}

impl PlayServicesFacade {
    /// Locate and bind the module named in `config`.
    ///
    /// The configured diagnostic backend, if any, is installed first so that
    /// binding diagnostics already go through it.
    ///
    /// # Errors
    ///
    /// - `InitializationFailed` if the module is missing or incompatible
    /// - `Runtime` if the configuration is invalid
    pub(crate) fn initialize(config: &FacadeConfig) -> Result<Self> {
        config.validate()?;

        if let Some(backend) = &config.diagnostic_backend {
            diagnostics::set_backend(Some(Arc::clone(backend)))?;
        }

        let module_name = config.module_name.as_str();

        let module = config
            .module_locator
            .locate(module_name)
            .ok_or_else(|| fatal(module_name, "module not found", None))?;

        let surface = module.surface().map_err(|err| {
            fatal(
                module_name,
                "module surface could not be read",
                Some(Cause::from_error(&err)),
            )
        })?;

        let constants = ModuleConstants::bind(module_name, &surface)
            .map_err(|reason| fatal(module_name, &reason, None))?;
        let resolution = ResolutionTable::resolve(module_name, &surface)
            .map_err(|reason| fatal(module_name, &reason, None))?;

        tracing::info!(
            module = module_name,
            bound = resolution.bound_count(),
            total = Operation::ALL.len(),
            "External module bound"
        );

        Ok(Self {
            module_name: module_name.to_string(),
            module,
            constants,
            resolution,
        })
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn constants(&self) -> &ModuleConstants {
        &self.constants
    }

    pub fn resolution(&self) -> &ResolutionTable {
        &self.resolution
    }

    /// Whether `operation` resolved, i.e. calls reach the module.
    pub fn is_resolved(&self, operation: Operation) -> bool {
        self.resolution.is_bound(operation)
    }

    pub fn binding_report(&self) -> BindingReport {
        BindingReport::new(&self.module_name, &self.constants, &self.resolution)
    }

    /// Dialog addressing `error_code`, notifying `cancel_listener` on dismissal.
    pub fn error_dialog_with_listener(
        &self,
        error_code: i32,
        activity: &Activity,
        request_code: i32,
        cancel_listener: Option<Arc<dyn CancelListener>>,
    ) -> Result<Option<Dialog>> {
        self.invoke(Operation::ErrorDialogWithListener, None, |module| {
            module.error_dialog_with_listener(error_code, activity, request_code, cancel_listener)
        })
    }

    /// Dialog addressing `error_code`.
    pub fn error_dialog(
        &self,
        error_code: i32,
        activity: &Activity,
        request_code: i32,
    ) -> Result<Option<Dialog>> {
        self.invoke(Operation::ErrorDialog, None, |module| {
            module.error_dialog(error_code, activity, request_code)
        })
    }

    /// Pending intent addressing `error_code`.
    pub fn error_pending_intent(
        &self,
        error_code: i32,
        context: &Context,
        request_code: i32,
    ) -> Result<Option<PendingIntent>> {
        self.invoke(Operation::ErrorPendingIntent, None, |module| {
            module.error_pending_intent(error_code, context, request_code)
        })
    }

    /// Human-readable name of `error_code`.
    pub fn error_string(&self, error_code: i32) -> Result<Option<String>> {
        self.invoke(Operation::ErrorString, None, |module| {
            module.error_string(error_code)
        })
    }

    /// Open-source license text; `None` when not resolved.
    pub fn open_source_software_license_info(&self, context: &Context) -> Result<Option<String>> {
        self.invoke(Operation::OpenSourceSoftwareLicenseInfo, None, |module| {
            module.open_source_software_license_info(context)
        })
    }

    /// The module package's own context; `None` when not resolved.
    pub fn remote_context(&self, context: &Context) -> Result<Option<Context>> {
        self.invoke(Operation::RemoteContext, None, |module| {
            module.remote_context(context)
        })
    }

    /// The module package's resources; `None` when not resolved.
    pub fn remote_resource(&self, context: &Context) -> Result<Option<Resources>> {
        self.invoke(Operation::RemoteResource, None, |module| {
            module.remote_resource(context)
        })
    }

    /// Raw availability code; `-1` when the check is not resolved.
    pub fn is_services_available(&self, context: &Context) -> Result<i32> {
        self.invoke(Operation::IsServicesAvailable, UNAVAILABLE_STATUS, |module| {
            module.is_services_available(context)
        })
    }

    /// Whether the user can fix `error_code`; `false` when not resolved.
    pub fn is_user_recoverable_error(&self, error_code: i32) -> Result<bool> {
        self.invoke(Operation::IsUserRecoverableError, false, |module| {
            module.is_user_recoverable_error(error_code)
        })
    }

    /// [`is_services_available`](Self::is_services_available) as a [`ServiceStatus`].
    pub fn service_status(&self, context: &Context) -> Result<ServiceStatus> {
        self.is_services_available(context)
            .map(ServiceStatus::from_code)
    }

    fn invoke<T>(
        &self,
        operation: Operation,
        sentinel: T,
        call: impl FnOnce(&dyn ServicesModule) -> BridgeResult<T>,
    ) -> Result<T> {
        if !self.resolution.is_bound(operation) {
            return Ok(sentinel);
        }

        call(self.module.as_ref()).map_err(|source| CoreError::Invocation {
            operation: operation.name(),
            source,
        })
    }
}

impl fmt::Debug for PlayServicesFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayServicesFacade")
            .field("module_name", &self.module_name)
            .field("module", &"ServicesModule { ... }")
            .field("constants", &self.constants)
            .field("resolution", &self.resolution)
            .finish()
    }
}

/// Report a failure that leaves the module unusable.
fn fatal(module_name: &str, reason: &str, cause: Option<Cause>) -> CoreError {
    let message = format!("Unable to bind {module_name}: {reason}");
    match &cause {
        Some(cause) => diagnostics::log_with_cause(Severity::Error, TAG, &message, cause),
        None => diagnostics::log(Severity::Error, TAG, &message),
    }

    let reason = match cause {
        Some(cause) => format!("{reason}: {cause}"),
        None => reason.to_string(),
    };

    CoreError::InitializationFailed {
        module: module_name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use bridge_traits::module::{FixedLocator, ModuleLocator, ModuleSurface, ValueKind};
    use mockall::mock;

    const NAME: &str = "com.example.Services";

    mock! {
        pub Services {}

        impl ServicesModule for Services {
            fn surface(&self) -> BridgeResult<ModuleSurface>;
            fn error_string(&self, error_code: i32) -> BridgeResult<Option<String>>;
            fn is_user_recoverable_error(&self, error_code: i32) -> BridgeResult<bool>;
        }
    }

    fn config_for(module: Arc<dyn ServicesModule>) -> FacadeConfig {
        FacadeConfig::builder()
            .module_name(NAME)
            .module_locator(Arc::new(FixedLocator::new(NAME, module)))
            .build()
            .unwrap()
    }

    fn two_operation_surface() -> ModuleSurface {
        ModuleSurface::new()
            .with_constant("GOOGLE_PLAY_SERVICES_VERSION_CODE", 12_451_000)
            .with_operation("getErrorString", vec![ValueKind::Int], ValueKind::Text)
            .with_operation("isUserRecoverableError", vec![ValueKind::Int], ValueKind::Bool)
    }

    #[test]
    fn test_resolved_operation_forwards_arguments() {
        let mut module = MockServices::new();
        module
            .expect_surface()
            .returning(|| Ok(two_operation_surface()));
        module
            .expect_error_string()
            .withf(|code| *code == 2)
            .times(1)
            .returning(|_| Ok(Some("SERVICE_VERSION_UPDATE_REQUIRED".to_string())));
        module
            .expect_is_user_recoverable_error()
            .withf(|code| *code == 9)
            .times(1)
            .returning(|_| Ok(true));

        let facade = PlayServicesFacade::initialize(&config_for(Arc::new(module))).unwrap();

        assert_eq!(
            facade.error_string(2).unwrap().as_deref(),
            Some("SERVICE_VERSION_UPDATE_REQUIRED")
        );
        assert!(facade.is_user_recoverable_error(9).unwrap());
        assert_eq!(facade.constants().services_version_code(), 12_451_000);
    }

    #[test]
    fn test_unresolved_operations_return_sentinels() {
        let mut module = MockServices::new();
        module.expect_surface().returning(|| Ok(ModuleSurface::new()));
        module.expect_error_string().never();
        module.expect_is_user_recoverable_error().never();

        let facade = PlayServicesFacade::initialize(&config_for(Arc::new(module))).unwrap();
        let context = Context::new(1, "com.example.app");

        assert_eq!(facade.error_string(1).unwrap(), None);
        assert!(!facade.is_user_recoverable_error(1).unwrap());
        assert_eq!(facade.is_services_available(&context).unwrap(), -1);
        assert_eq!(
            facade.service_status(&context).unwrap(),
            ServiceStatus::Unavailable
        );
        assert_eq!(facade.resolution().bound_count(), 0);
    }

    #[test]
    fn test_invocation_failure_is_propagated() {
        let mut module = MockServices::new();
        module
            .expect_surface()
            .returning(|| Ok(two_operation_surface()));
        module
            .expect_error_string()
            .returning(|_| Err(BridgeError::OperationFailed("remote died".to_string())));

        let facade = PlayServicesFacade::initialize(&config_for(Arc::new(module))).unwrap();

        match facade.error_string(4) {
            Err(CoreError::Invocation { operation, source }) => {
                assert_eq!(operation, "getErrorString");
                assert!(matches!(source, BridgeError::OperationFailed(_)));
            }
            other => panic!("expected Invocation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_surface_is_fatal() {
        let mut module = MockServices::new();
        module
            .expect_surface()
            .returning(|| Err(BridgeError::Incompatible("stripped by the shrinker".to_string())));

        let err = PlayServicesFacade::initialize(&config_for(Arc::new(module))).unwrap_err();

        assert!(err.is_fatal());
        assert!(err.to_string().contains("stripped by the shrinker"));
    }

    #[test]
    fn test_missing_module_is_fatal() {
        struct Nowhere;

        impl ModuleLocator for Nowhere {
            fn locate(&self, _name: &str) -> Option<Arc<dyn ServicesModule>> {
                None
            }
        }

        let config = FacadeConfig::builder()
            .module_name(NAME)
            .module_locator(Arc::new(Nowhere))
            .build()
            .unwrap();

        match PlayServicesFacade::initialize(&config) {
            Err(CoreError::InitializationFailed { module, reason }) => {
                assert_eq!(module, NAME);
                assert!(reason.contains("not found"));
            }
            other => panic!("expected InitializationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_facade_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlayServicesFacade>();
    }
}
