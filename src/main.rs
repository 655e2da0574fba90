use rdv_rust::utils::logging::init_logging;
use rdv_rust::{app, config, demos};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut settings = config::load_settings();

    // A demo name on the command line overrides the settings file.
    if let Some(name) = std::env::args().nth(1) {
        settings.demo = name;
    }

    let demo = demos::find(&settings.demo).ok_or_else(|| {
        let names: Vec<&str> = demos::builtin().iter().map(|d| d.name).collect();
        anyhow::anyhow!(
            "unknown demo '{}' (available: {})",
            settings.demo,
            names.join(", ")
        )
    })?;

    info!(
        "{} {} starting demo '{}'",
        rdv_rust::APP_NAME,
        rdv_rust::VERSION,
        demo.name
    );

    app::run(settings, demo)
}
