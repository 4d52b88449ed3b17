//! Application entry point for the sketch viewer.
//!
//! This binary sets up logging and eframe/egui, then delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use sketch_core::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Space around the canvas for panels and margins, as `[width, height]`.
const CHROME: [f32; 2] = [280.0, 90.0];

/// Starts the native eframe application.
///
/// The window is sized so the default canvas fits next to the config
/// panel. Log filtering follows `RUST_LOG` and defaults to `info`.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = Config::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            cfg.canvas.width + CHROME[0],
            cfg.canvas.height + CHROME[1],
        ]),
        ..Default::default()
    };

    info!(
        width = cfg.canvas.width,
        height = cfg.canvas.height,
        "starting sketch viewer"
    );

    eframe::run_native(
        "Sketches",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
