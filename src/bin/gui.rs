use eframe::egui;
use grid_cell_editor::{logging, DataGridApp};
use std::path::PathBuf;

/// Usage: gui [CONFIG.json [ROWS.json]]
fn main() -> eframe::Result<()> {
    logging::init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let loaded = match args.as_slice() {
        [] => Ok(DataGridApp::new()),
        [config] => DataGridApp::from_config_file(config),
        [config, rows, ..] => DataGridApp::from_files(config, rows),
    };
    let app = loaded.unwrap_or_else(|e| {
        tracing::error!("{:#}", e);
        eprintln!("❌ {:#}, falling back to the sample grid", e);
        DataGridApp::new()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Grid Cell Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Grid Cell Editor",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
