use std::path::PathBuf;

mod controller;
mod ui;

use anyhow::anyhow;
use board_core::config::load_settings;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::protocol::BoardEvent;
use tracing_subscriber::EnvFilter;

use crate::controller::orchestration::EVENT_QUEUE_CAPACITY;
use crate::ui::{
    theme::{BoardUiSettings, SETTINGS_STORAGE_KEY},
    OrderBoardApp,
};

#[derive(Parser, Debug)]
struct Args {
    /// Settings file (defaults to ./board.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(title = %settings.window_title, "starting desktop order board");

    let (event_tx, event_rx) = bounded::<BoardEvent>(EVENT_QUEUE_CAPACITY);
    let show_help_on_start = settings.show_help_on_start;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.clone())
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| BoardUiSettings::from_json(&text))
            });
            Ok(Box::new(OrderBoardApp::new(
                event_tx,
                event_rx,
                persisted_settings,
                show_help_on_start,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop board exited with an error: {err}"))
}
