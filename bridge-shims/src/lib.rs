//! # Default Bridge Implementations
//!
//! Ready-made adapters for the traits in `bridge-traits`.
//!
//! ## Overview
//!
//! - [`ModuleRegistry`] - process-wide `ModuleLocator`; adapter crates that
//!   link the real dependency register themselves here at startup
//! - [`StaticModule`] - `ServicesModule` assembled from closures, one per
//!   operation the host can actually serve
//! - [`MemoryBackend`] - `DiagnosticBackend` that keeps entries in memory for
//!   hosts that surface diagnostics in their own UI
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_shims::{ModuleRegistry, StaticModule};
//! use std::sync::Arc;
//!
//! let module = StaticModule::builder()
//!     .constant("GOOGLE_PLAY_SERVICES_VERSION_CODE", 12_451_000)
//!     .is_user_recoverable_error(|code| Ok(matches!(code, 1 | 2 | 3 | 9)))
//!     .build();
//!
//! ModuleRegistry::global().register(
//!     "com.google.android.gms.common.GooglePlayServicesUtil",
//!     Arc::new(module),
//! );
//! ```

mod memory;
mod registry;
mod static_module;

pub use memory::MemoryBackend;
pub use registry::ModuleRegistry;
pub use static_module::{StaticModule, StaticModuleBuilder};
