// livetail - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and validation
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use livetail::app;
pub use livetail::core;
pub use livetail::platform;
pub use livetail::ui;
pub use livetail::util;

use clap::Parser;
use platform::config::{load_config, PlatformPaths, Settings};

/// livetail - Live log viewer streaming entries over server-sent events.
///
/// Connects to a log server's event-stream endpoint, buffers entries for
/// the session, and filters them by fuzzy or regex search.
#[derive(Parser, Debug)]
#[command(name = "livetail", version, about)]
struct Cli {
    /// Base address of the log server (e.g. http://127.0.0.1:9000).
    /// Overrides the LIVETAIL_ADDR environment variable and config file.
    #[arg(short, long)]
    addr: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Apply the configured body font size to the egui context.
fn configure_text_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(font_size));
    ctx.set_style(style);
}

fn main() {
    let cli = Cli::parse();

    // Load the config file before logging so its [logging] level can
    // participate in filter selection. Load failures fall back to defaults
    // and are reported once logging is up.
    let platform_paths = PlatformPaths::resolve();
    let config_file = platform_paths.config_file();
    let (config, config_error) = match load_config(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (Default::default(), Some(e)),
    };

    util::logging::init(cli.debug, config.logging.level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "livetail starting"
    );
    tracing::debug!(config = %config_file.display(), "Platform paths resolved");

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Config file ignored; using defaults");
    }

    let settings = match Settings::from_sources(cli.addr.as_deref(), &config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let url = settings.endpoint_url();
    tracing::info!(url = %url, "Log endpoint resolved");

    let state = app::state::AppState::new(url, settings.debounce, cli.debug);
    let font_size = settings.font_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_text_styles(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::LivetailApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch livetail GUI: {e}");
        std::process::exit(1);
    }
}
