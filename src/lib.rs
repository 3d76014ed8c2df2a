//! Workspace placeholder crate.
//!
//! This crate exposes the feature flags that map to the individual workspace
//! crates (`core-service`, `bridge-shims`). Host applications can depend on
//! `gms-bridge` and enable `shims` to get the process-wide module registry
//! wired in as the default module locator.

#[cfg(feature = "shims")]
pub use core_service::*;
