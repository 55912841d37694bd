#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod controller;
mod error;
mod events;
mod listing;
mod natsort;
mod preview;
mod rename;
mod selection;
mod state;
mod ui;
mod undo;
mod widgets;

use druid::{AppLauncher, WindowDesc};
use state::AppState;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pdf_batch_renamer=info")),
        )
        .with_target(false)
        .init();

    let main_window = WindowDesc::new(ui::build_ui())
        .title("※ PDF 名前変更ツール + プレビュー機能")
        .window_size((700.0, 780.0))
        .resizable(false);

    AppLauncher::with_window(main_window)
        .launch(AppState::new())
        .map_err(|e| anyhow::anyhow!("failed to launch application: {e}"))
}
