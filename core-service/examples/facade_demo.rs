//! Binding demonstration
//!
//! Registers a partial services module, binds the process-wide façade and
//! prints what got bound.
//!
//! Run with:
//! ```bash
//! cargo run -p core-service --example facade_demo
//!
//! # JSON logs, with the façade's own diagnostics
//! cargo run -p core-service --example facade_demo -- json "core_runtime=debug"
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Context as _;
use bridge_shims::{ModuleRegistry, StaticModule};
use bridge_traits::host::{Activity, Context, Dialog};
use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
use core_service::{FacadeConfig, DEFAULT_MODULE_NAME};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Debug);
    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }
    init_logging(config).context("failed to initialize logging")?;

    // A host that links only part of the real library
    let module = StaticModule::builder()
        .constant("GOOGLE_PLAY_SERVICES_PACKAGE", "com.google.android.gms")
        .constant("GOOGLE_PLAY_SERVICES_VERSION_CODE", 12_451_000)
        .error_string(|code| Ok(Some(format!("ERROR_{code}"))))
        .error_dialog(|code, _activity, _request| {
            Ok(Some(Dialog {
                handle: 1,
                error_code: code,
            }))
        })
        .is_services_available(|_| Ok(2))
        .is_user_recoverable_error(|code| Ok(matches!(code, 1 | 2 | 3 | 9)))
        .build();
    ModuleRegistry::global().register(DEFAULT_MODULE_NAME, Arc::new(module));

    let facade = core_service::install(FacadeConfig::builder().build()?)?;

    let context = Context::new(1, "com.example.demo");
    let activity = Activity::new(context.clone(), "DemoActivity");

    let status = facade.service_status(&context)?;
    info!(%status, "Availability checked");

    if facade.is_user_recoverable_error(status.code())? {
        let dialog = facade.error_dialog(status.code(), &activity, 9000)?;
        info!(?dialog, "Error dialog requested");
    }

    // Not provided by this module, so the sentinel comes back
    let remote = facade.remote_context(&context)?;
    info!(?remote, "Remote context requested");

    println!("{}", facade.binding_report().to_json()?);

    Ok(())
}
