//! A failed process-wide binding is remembered.
#![cfg(feature = "shims")]

use std::sync::Arc;

use bridge_shims::MemoryBackend;
use bridge_traits::diagnostics::Severity;
use core_service::{facade, install, CoreError, FacadeConfig, ModuleRegistry, StaticModule};

#[test]
fn test_absent_module_fails_every_caller() {
    let memory = Arc::new(MemoryBackend::new());
    let config = FacadeConfig::builder()
        .module_name("com.example.Missing")
        .diagnostic_backend(memory.clone())
        .build()
        .unwrap();

    match install(config) {
        Err(CoreError::InitializationFailed { module, reason }) => {
            assert_eq!(module, "com.example.Missing");
            assert!(reason.contains("not found"));
        }
        other => panic!("expected InitializationFailed, got {other:?}"),
    }

    let fatal = memory
        .entries()
        .into_iter()
        .filter(|entry| entry.severity == Severity::Error)
        .count();
    assert_eq!(fatal, 1);

    // Registering afterwards does not revive the façade
    ModuleRegistry::global().register("com.example.Missing", Arc::new(StaticModule::builder().build()));

    let err = facade().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("com.example.Missing"));
}
