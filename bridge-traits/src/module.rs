//! External Module Contract
//!
//! Describes the optional third-party component the core proxies. An adapter
//! implementing [`ServicesModule`] stands in for the component: it declares
//! which constants and operations it actually exposes through
//! [`ServicesModule::surface`] and implements the operations it declares.
//!
//! Adapters are found by name through a [`ModuleLocator`]. The locator is
//! selected by configuration (a process-wide registry, a fixed adapter in
//! tests, ...) rather than by searching symbols at runtime.
//!
//! # Example
//!
//! ```ignore
//! use bridge_traits::module::{ModuleSurface, ServicesModule, ValueKind};
//! use bridge_traits::error::Result;
//!
//! struct LinkedServices;
//!
//! impl ServicesModule for LinkedServices {
//!     fn surface(&self) -> Result<ModuleSurface> {
//!         Ok(ModuleSurface::new()
//!             .with_constant("GOOGLE_PLAY_SERVICES_VERSION_CODE", 12_451_000)
//!             .with_operation("getErrorString", vec![ValueKind::Int], ValueKind::Text))
//!     }
//!
//!     fn error_string(&self, error_code: i32) -> Result<Option<String>> {
//!         Ok(Some(format!("error {error_code}")))
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BridgeError, Result};
use crate::host::{Activity, CancelListener, Context, Dialog, PendingIntent, Resources};
use crate::platform::PlatformSendSync;

/// Shape of a parameter or return value in an operation signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Bool,
    Text,
    Context,
    Activity,
    CancelListener,
    Dialog,
    PendingIntent,
    Resources,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::Context => "Context",
            ValueKind::Activity => "Activity",
            ValueKind::CancelListener => "CancelListener",
            ValueKind::Dialog => "Dialog",
            ValueKind::PendingIntent => "PendingIntent",
            ValueKind::Resources => "Resources",
        };
        f.write_str(name)
    }
}

/// Name and shape of one operation exposed by a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationSignature {
    pub name: String,
    pub params: Vec<ValueKind>,
    pub returns: ValueKind,
}

impl OperationSignature {
    pub fn new(name: impl Into<String>, params: Vec<ValueKind>, returns: ValueKind) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({}) -> {}", self.name, params, self.returns)
    }
}

/// Value of a configuration constant published by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Text(String),
    Int(i32),
}

impl ConstantValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConstantValue::Text(_) => ValueKind::Text,
            ConstantValue::Int(_) => ValueKind::Int,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Text(value) => f.write_str(value),
            ConstantValue::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        ConstantValue::Text(value.to_string())
    }
}

impl From<String> for ConstantValue {
    fn from(value: String) -> Self {
        ConstantValue::Text(value)
    }
}

impl From<i32> for ConstantValue {
    fn from(value: i32) -> Self {
        ConstantValue::Int(value)
    }
}

/// Everything a module declares about itself: named constants and the
/// signatures of the operations it implements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSurface {
    pub constants: BTreeMap<String, ConstantValue>,
    pub operations: Vec<OperationSignature>,
}

impl ModuleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<ConstantValue>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    pub fn with_operation(
        mut self,
        name: impl Into<String>,
        params: Vec<ValueKind>,
        returns: ValueKind,
    ) -> Self {
        self.operations
            .push(OperationSignature::new(name, params, returns));
        self
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantValue> {
        self.constants.get(name)
    }

    /// Look up an operation by name and parameter shape. Overloads that share
    /// a name are told apart by their parameters; the return shape is not
    /// part of the lookup key.
    pub fn find_operation(&self, name: &str, params: &[ValueKind]) -> Option<&OperationSignature> {
        self.operations
            .iter()
            .find(|op| op.name == name && op.params == params)
    }
}

/// Build the error an adapter returns for an operation it does not implement.
pub fn not_provided(operation: &str) -> BridgeError {
    BridgeError::NotAvailable(format!("{operation} is not provided by this module"))
}

/// Adapter for the optional external module.
///
/// Only [`surface`](ServicesModule::surface) is required. Operation methods
/// default to returning [`BridgeError::NotAvailable`]; an adapter overrides
/// the ones it declares in its surface. Callers only invoke operations that
/// resolved against the declared surface.
pub trait ServicesModule: PlatformSendSync {
    /// Declare constants and operation signatures.
    ///
    /// An error here means the module was found but could not be inspected,
    /// which callers treat as an incompatible module.
    fn surface(&self) -> Result<ModuleSurface>;

    /// `getErrorDialog(int, Activity, int, CancelListener)`
    fn error_dialog_with_listener(
        &self,
        _error_code: i32,
        _activity: &Activity,
        _request_code: i32,
        _cancel_listener: Option<Arc<dyn CancelListener>>,
    ) -> Result<Option<Dialog>> {
        Err(not_provided("getErrorDialog"))
    }

    /// `getErrorDialog(int, Activity, int)`
    fn error_dialog(
        &self,
        _error_code: i32,
        _activity: &Activity,
        _request_code: i32,
    ) -> Result<Option<Dialog>> {
        Err(not_provided("getErrorDialog"))
    }

    /// `getErrorPendingIntent(int, Context, int)`
    fn error_pending_intent(
        &self,
        _error_code: i32,
        _context: &Context,
        _request_code: i32,
    ) -> Result<Option<PendingIntent>> {
        Err(not_provided("getErrorPendingIntent"))
    }

    /// `getErrorString(int)`
    fn error_string(&self, _error_code: i32) -> Result<Option<String>> {
        Err(not_provided("getErrorString"))
    }

    /// `getOpenSourceSoftwareLicenseInfo(Context)`
    fn open_source_software_license_info(&self, _context: &Context) -> Result<Option<String>> {
        Err(not_provided("getOpenSourceSoftwareLicenseInfo"))
    }

    /// `getRemoteContext(Context)`
    fn remote_context(&self, _context: &Context) -> Result<Option<Context>> {
        Err(not_provided("getRemoteContext"))
    }

    /// `getRemoteResource(Context)`
    fn remote_resource(&self, _context: &Context) -> Result<Option<Resources>> {
        Err(not_provided("getRemoteResource"))
    }

    /// `isGooglePlayServicesAvailable(Context)`
    fn is_services_available(&self, _context: &Context) -> Result<i32> {
        Err(not_provided("isGooglePlayServicesAvailable"))
    }

    /// `isUserRecoverableError(int)`
    fn is_user_recoverable_error(&self, _error_code: i32) -> Result<bool> {
        Err(not_provided("isUserRecoverableError"))
    }
}

/// Finds module adapters by their well-known name.
pub trait ModuleLocator: PlatformSendSync {
    fn locate(&self, name: &str) -> Option<Arc<dyn ServicesModule>>;
}

/// A fixed adapter is its own locator when the name matches.
#[derive(Clone)]
pub struct FixedLocator {
    name: String,
    module: Arc<dyn ServicesModule>,
}

impl FixedLocator {
    pub fn new(name: impl Into<String>, module: Arc<dyn ServicesModule>) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }
}

impl ModuleLocator for FixedLocator {
    fn locate(&self, name: &str) -> Option<Arc<dyn ServicesModule>> {
        (self.name == name).then(|| Arc::clone(&self.module))
    }
}
