mod app;
mod io;
mod model;

use app::SearchApp;
use png_meta_search::config::Config;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config = Config::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ComfyUI Metadata Search",
        options,
        Box::new(|_cc| Box::new(SearchApp::new(config))),
    )
}
