//! Closure-backed Module Adapter
//!
//! [`StaticModule`] lets a host that links the real dependency expose it to
//! the core without writing a full `ServicesModule` implementation: each
//! operation the host can serve is supplied as a closure, and the declared
//! surface is derived from exactly the closures that were provided.

use bridge_traits::error::Result;
use bridge_traits::host::{Activity, CancelListener, Context, Dialog, PendingIntent, Resources};
use bridge_traits::module::{
    not_provided, ConstantValue, ModuleSurface, ServicesModule, ValueKind,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type DialogWithListenerFn = Box<
    dyn Fn(i32, &Activity, i32, Option<Arc<dyn CancelListener>>) -> Result<Option<Dialog>>
        + Send
        + Sync,
>;
type DialogFn = Box<dyn Fn(i32, &Activity, i32) -> Result<Option<Dialog>> + Send + Sync>;
type PendingIntentFn =
    Box<dyn Fn(i32, &Context, i32) -> Result<Option<PendingIntent>> + Send + Sync>;
type CodeTextFn = Box<dyn Fn(i32) -> Result<Option<String>> + Send + Sync>;
type ContextTextFn = Box<dyn Fn(&Context) -> Result<Option<String>> + Send + Sync>;
type ContextFn = Box<dyn Fn(&Context) -> Result<Option<Context>> + Send + Sync>;
type ResourcesFn = Box<dyn Fn(&Context) -> Result<Option<Resources>> + Send + Sync>;
type AvailabilityFn = Box<dyn Fn(&Context) -> Result<i32> + Send + Sync>;
type RecoverableFn = Box<dyn Fn(i32) -> Result<bool> + Send + Sync>;

/// Module adapter assembled from closures.
pub struct StaticModule {
    constants: BTreeMap<String, ConstantValue>,
    error_dialog_with_listener: Option<DialogWithListenerFn>,
    error_dialog: Option<DialogFn>,
    error_pending_intent: Option<PendingIntentFn>,
    error_string: Option<CodeTextFn>,
    open_source_software_license_info: Option<ContextTextFn>,
    remote_context: Option<ContextFn>,
    remote_resource: Option<ResourcesFn>,
    is_services_available: Option<AvailabilityFn>,
    is_user_recoverable_error: Option<RecoverableFn>,
}

impl StaticModule {
    pub fn builder() -> StaticModuleBuilder {
        StaticModuleBuilder::default()
    }
}

impl fmt::Debug for StaticModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let surface = self.declared_surface();
        f.debug_struct("StaticModule")
            .field("constants", &self.constants)
            .field(
                "operations",
                &surface
                    .operations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl StaticModule {
    fn declared_surface(&self) -> ModuleSurface {
        use ValueKind as K;

        let mut surface = ModuleSurface {
            constants: self.constants.clone(),
            operations: Vec::new(),
        };

        if self.error_dialog_with_listener.is_some() {
            surface = surface.with_operation(
                "getErrorDialog",
                vec![K::Int, K::Activity, K::Int, K::CancelListener],
                K::Dialog,
            );
        }
        if self.error_dialog.is_some() {
            surface = surface.with_operation("getErrorDialog", vec![K::Int, K::Activity, K::Int], K::Dialog);
        }
        if self.error_pending_intent.is_some() {
            surface = surface.with_operation(
                "getErrorPendingIntent",
                vec![K::Int, K::Context, K::Int],
                K::PendingIntent,
            );
        }
        if self.error_string.is_some() {
            surface = surface.with_operation("getErrorString", vec![K::Int], K::Text);
        }
        if self.open_source_software_license_info.is_some() {
            surface =
                surface.with_operation("getOpenSourceSoftwareLicenseInfo", vec![K::Context], K::Text);
        }
        if self.remote_context.is_some() {
            surface = surface.with_operation("getRemoteContext", vec![K::Context], K::Context);
        }
        if self.remote_resource.is_some() {
            surface = surface.with_operation("getRemoteResource", vec![K::Context], K::Resources);
        }
        if self.is_services_available.is_some() {
            surface = surface.with_operation("isGooglePlayServicesAvailable", vec![K::Context], K::Int);
        }
        if self.is_user_recoverable_error.is_some() {
            surface = surface.with_operation("isUserRecoverableError", vec![K::Int], K::Bool);
        }

        surface
    }
}

impl ServicesModule for StaticModule {
    fn surface(&self) -> Result<ModuleSurface> {
        Ok(self.declared_surface())
    }

    fn error_dialog_with_listener(
        &self,
        error_code: i32,
        activity: &Activity,
        request_code: i32,
        cancel_listener: Option<Arc<dyn CancelListener>>,
    ) -> Result<Option<Dialog>> {
        match &self.error_dialog_with_listener {
            Some(op) => op(error_code, activity, request_code, cancel_listener),
            None => Err(not_provided("getErrorDialog")),
        }
    }

    fn error_dialog(
        &self,
        error_code: i32,
        activity: &Activity,
        request_code: i32,
    ) -> Result<Option<Dialog>> {
        match &self.error_dialog {
            Some(op) => op(error_code, activity, request_code),
            None => Err(not_provided("getErrorDialog")),
        }
    }

    fn error_pending_intent(
        &self,
        error_code: i32,
        context: &Context,
        request_code: i32,
    ) -> Result<Option<PendingIntent>> {
        match &self.error_pending_intent {
            Some(op) => op(error_code, context, request_code),
            None => Err(not_provided("getErrorPendingIntent")),
        }
    }

    fn error_string(&self, error_code: i32) -> Result<Option<String>> {
        match &self.error_string {
            Some(op) => op(error_code),
            None => Err(not_provided("getErrorString")),
        }
    }

    fn open_source_software_license_info(&self, context: &Context) -> Result<Option<String>> {
        match &self.open_source_software_license_info {
            Some(op) => op(context),
            None => Err(not_provided("getOpenSourceSoftwareLicenseInfo")),
        }
    }

    fn remote_context(&self, context: &Context) -> Result<Option<Context>> {
        match &self.remote_context {
            Some(op) => op(context),
            None => Err(not_provided("getRemoteContext")),
        }
    }

    fn remote_resource(&self, context: &Context) -> Result<Option<Resources>> {
        match &self.remote_resource {
            Some(op) => op(context),
            None => Err(not_provided("getRemoteResource")),
        }
    }

    fn is_services_available(&self, context: &Context) -> Result<i32> {
        match &self.is_services_available {
            Some(op) => op(context),
            None => Err(not_provided("isGooglePlayServicesAvailable")),
        }
    }

    fn is_user_recoverable_error(&self, error_code: i32) -> Result<bool> {
        match &self.is_user_recoverable_error {
            Some(op) => op(error_code),
            None => Err(not_provided("isUserRecoverableError")),
        }
    }
}

/// Builder for [`StaticModule`].
#[derive(Default)]
pub struct StaticModuleBuilder {
    constants: BTreeMap<String, ConstantValue>,
    error_dialog_with_listener: Option<DialogWithListenerFn>,
    error_dialog: Option<DialogFn>,
    error_pending_intent: Option<PendingIntentFn>,
    error_string: Option<CodeTextFn>,
    open_source_software_license_info: Option<ContextTextFn>,
    remote_context: Option<ContextFn>,
    remote_resource: Option<ResourcesFn>,
    is_services_available: Option<AvailabilityFn>,
    is_user_recoverable_error: Option<RecoverableFn>,
}

impl StaticModuleBuilder {
    /// Publish a configuration constant.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<ConstantValue>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    pub fn error_dialog_with_listener<F>(mut self, op: F) -> Self
    where
        F: Fn(i32, &Activity, i32, Option<Arc<dyn CancelListener>>) -> Result<Option<Dialog>>
            + Send
            + Sync
            + 'static,
    {
        self.error_dialog_with_listener = Some(Box::new(op));
        self
    }

    pub fn error_dialog<F>(mut self, op: F) -> Self
    where
        F: Fn(i32, &Activity, i32) -> Result<Option<Dialog>> + Send + Sync + 'static,
    {
        self.error_dialog = Some(Box::new(op));
        self
    }

    pub fn error_pending_intent<F>(mut self, op: F) -> Self
    where
        F: Fn(i32, &Context, i32) -> Result<Option<PendingIntent>> + Send + Sync + 'static,
    {
        self.error_pending_intent = Some(Box::new(op));
        self
    }

    pub fn error_string<F>(mut self, op: F) -> Self
    where
        F: Fn(i32) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.error_string = Some(Box::new(op));
        self
    }

    pub fn open_source_software_license_info<F>(mut self, op: F) -> Self
    where
        F: Fn(&Context) -> Result<Option<String>> + Send + Sync + 'static,
    {
        self.open_source_software_license_info = Some(Box::new(op));
        self
    }

    pub fn remote_context<F>(mut self, op: F) -> Self
    where
        F: Fn(&Context) -> Result<Option<Context>> + Send + Sync + 'static,
    {
        self.remote_context = Some(Box::new(op));
        self
    }

    pub fn remote_resource<F>(mut self, op: F) -> Self
    where
        F: Fn(&Context) -> Result<Option<Resources>> + Send + Sync + 'static,
    {
        self.remote_resource = Some(Box::new(op));
        self
    }

    pub fn is_services_available<F>(mut self, op: F) -> Self
    where
        F: Fn(&Context) -> Result<i32> + Send + Sync + 'static,
    {
        self.is_services_available = Some(Box::new(op));
        self
    }

    pub fn is_user_recoverable_error<F>(mut self, op: F) -> Self
    where
        F: Fn(i32) -> Result<bool> + Send + Sync + 'static,
    {
        self.is_user_recoverable_error = Some(Box::new(op));
        self
    }

    pub fn build(self) -> StaticModule {
        StaticModule {
            constants: self.constants,
            error_dialog_with_listener: self.error_dialog_with_listener,
            error_dialog: self.error_dialog,
            error_pending_intent: self.error_pending_intent,
            error_string: self.error_string,
            open_source_software_license_info: self.open_source_software_license_info,
            remote_context: self.remote_context,
            remote_resource: self.remote_resource,
            is_services_available: self.is_services_available,
            is_user_recoverable_error: self.is_user_recoverable_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::BridgeError;

    #[test]
    fn test_surface_lists_only_provided_operations() {
        let module = StaticModule::builder()
            .constant("GOOGLE_PLAY_SERVICES_PACKAGE", "com.google.android.gms")
            .error_string(|code| Ok(Some(format!("code {code}"))))
            .is_user_recoverable_error(|code| Ok(code == 2))
            .build();

        let surface = module.surface().unwrap();
        assert_eq!(surface.operations.len(), 2);
        assert!(surface
            .find_operation("getErrorString", &[ValueKind::Int])
            .is_some());
        assert!(surface
            .find_operation("isUserRecoverableError", &[ValueKind::Int])
            .is_some());
        assert_eq!(
            surface.constant("GOOGLE_PLAY_SERVICES_PACKAGE"),
            Some(&ConstantValue::Text("com.google.android.gms".to_string()))
        );
    }

    #[test]
    fn test_provided_operation_is_called() {
        let module = StaticModule::builder()
            .error_string(|code| Ok(Some(format!("code {code}"))))
            .build();

        assert_eq!(module.error_string(7).unwrap(), Some("code 7".to_string()));
    }

    #[test]
    fn test_missing_operation_reports_not_available() {
        let module = StaticModule::builder().build();
        let context = Context::new(1, "com.example.host");

        let err = module.is_services_available(&context).unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
        assert!(module.surface().unwrap().operations.is_empty());
    }

    #[test]
    fn test_both_dialog_overloads_declared() {
        let module = StaticModule::builder()
            .error_dialog(|code, _, _| Ok(Some(Dialog { handle: 1, error_code: code })))
            .error_dialog_with_listener(|code, _, _, _| {
                Ok(Some(Dialog {
                    handle: 2,
                    error_code: code,
                }))
            })
            .build();

        let surface = module.surface().unwrap();
        let dialog_ops = surface
            .operations
            .iter()
            .filter(|op| op.name == "getErrorDialog")
            .count();
        assert_eq!(dialog_ops, 2);
    }
}
