//! # Host Bridge Traits
//!
//! Contracts between the core and the things it does not own.
//!
//! ## Overview
//!
//! The core proxies an optional external module (modelled on the Google Play
//! services utility class) and reports its own diagnostics through a
//! pluggable backend. Neither is guaranteed to exist in a given process, so
//! both are described here as traits that hosts implement or pick from
//! `bridge-shims`.
//!
//! ## Traits
//!
//! ### External module
//! - [`ServicesModule`](module::ServicesModule) - Declared surface plus one method per proxied operation
//! - [`ModuleLocator`](module::ModuleLocator) - Finds a module adapter by its well-known name
//!
//! ### Diagnostics
//! - [`DiagnosticBackend`](diagnostics::DiagnosticBackend) - Six leveled-logging operations
//!
//! ### Host handles
//! - [`Context`](host::Context), [`Activity`](host::Activity), [`Dialog`](host::Dialog),
//!   [`PendingIntent`](host::PendingIntent), [`Resources`](host::Resources)
//! - [`CancelListener`](host::CancelListener) - Dialog dismissal callback
//!
//! ## Error Handling
//!
//! Adapters report failures with [`BridgeError`](error::BridgeError):
//!
//! - `NotAvailable` for operations the adapter does not implement
//! - `OperationFailed` for failures raised by the underlying module during a call
//! - `Incompatible` when the module cannot be inspected at all
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` on native targets (see
//! [`PlatformSendSync`](platform::PlatformSendSync)); after initialization the
//! core shares adapters across threads without further locking.

pub mod diagnostics;
pub mod error;
pub mod host;
pub mod module;
pub mod platform;

pub use error::BridgeError;

// Re-export commonly used types
pub use diagnostics::{Cause, ConsoleBackend, DiagnosticBackend, LogEntry, LogOperation, Severity};
pub use host::{Activity, CancelListener, Context, Dialog, PendingIntent, Resources};
pub use module::{
    ConstantValue, FixedLocator, ModuleLocator, ModuleSurface, OperationSignature, ServicesModule,
    ValueKind,
};
