//! Host Handle Types
//!
//! Opaque handles for the host-side objects that flow through the external
//! module's operations. The core never looks inside them; it only forwards
//! them to the module and hands results back to the host.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::platform::PlatformSendSync;

/// Host application context (Android `Context` on device, an arbitrary
/// host-defined handle elsewhere).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// Host-assigned handle identifying the underlying object
    pub handle: u64,
    /// Package the context belongs to
    pub package_name: String,
}

impl Context {
    pub fn new(handle: u64, package_name: impl Into<String>) -> Self {
        Self {
            handle,
            package_name: package_name.into(),
        }
    }
}

/// Foreground activity that can host a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activity {
    pub context: Context,
    pub name: String,
}

impl Activity {
    pub fn new(context: Context, name: impl Into<String>) -> Self {
        Self {
            context,
            name: name.into(),
        }
    }
}

/// Dialog produced by the external module to address an error code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialog {
    pub handle: u64,
    pub error_code: i32,
}

/// Deferred intent produced by the external module to address an error code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingIntent {
    pub handle: u64,
    pub request_code: i32,
}

/// Resource bundle of the external module's own package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    pub handle: u64,
    pub package_name: String,
}

/// Callback invoked when the user dismisses an error dialog.
pub trait CancelListener: PlatformSendSync {
    fn on_cancel(&self);
}

impl fmt::Debug for dyn CancelListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelListener { ... }")
    }
}
