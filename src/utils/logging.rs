use std::env;
use std::fs;
use std::io;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging with console and session log file output
pub fn init_logging() {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let enable_wgpu_logging = env::var("WGPU_LOG").unwrap_or_else(|_| "0".to_string()) == "1";
    let enable_backtrace = env::var("RUST_BACKTRACE").unwrap_or_else(|_| "0".to_string()) == "1";

    // Remove existing log.txt file if it exists
    if let Err(e) = fs::remove_file("log.txt") {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("Warning: Failed to remove existing log.txt: {}", e);
        }
    }

    let log_file = fs::File::create("log.txt").expect("Failed to create log.txt");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&log_level);

        if enable_wgpu_logging {
            filter = filter.add_directive("wgpu=debug".parse().unwrap());
            filter = filter.add_directive("wgpu_core=debug".parse().unwrap());
            filter = filter.add_directive("wgpu_hal=debug".parse().unwrap());
        }

        filter = filter.add_directive("rdv_rust=debug".parse().unwrap());

        filter
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(log_file)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false), // No ANSI codes in file
        );

    subscriber.init();

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized with level: {}", log_level);
    tracing::info!("File logging enabled: log.txt (session-based, cleaned on startup)");
}

/// Log wgpu adapter information
pub fn log_adapter_info(adapter: &wgpu::Adapter) {
    let info = adapter.get_info();
    tracing::info!("=== WGPU Adapter Information ===");
    tracing::info!("Name: {}", info.name);
    tracing::info!("Backend: {:?}", info.backend);
    tracing::info!("Device Type: {:?}", info.device_type);
    tracing::info!("Driver: {} {}", info.driver, info.driver_info);
    tracing::info!("=================================");
}
