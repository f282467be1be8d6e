mod backend_bridge;
mod config;
mod controller;
mod snapshot;
mod ui;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use client_core::HttpGuestApi;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::CliOverrides;
use crate::controller::events::UiEvent;
use crate::ui::{GuestDeskApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Review guests, collect mailing addresses and track outreach")]
struct Args {
    /// Settings file (TOML). Defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the guest server.
    #[arg(long)]
    server_url: Option<String>,
    /// Exported guest list (JSON) to review.
    #[arg(long)]
    guests: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = config::load_settings(&CliOverrides {
        config_path: args.config,
        server_url: args.server_url,
        guests_path: args.guests,
    })?;
    let api = HttpGuestApi::with_timeout(&settings.server_url, settings.request_timeout())?;

    let (snapshot, load_error) = match settings.guests_path.as_deref() {
        Some(path) => match snapshot::load_review_snapshot(path) {
            Ok(snapshot) => (snapshot, None),
            Err(err) => {
                tracing::error!("{err:#}");
                (Default::default(), Some(format!("{err:#}")))
            }
        },
        None => {
            tracing::warn!("no guest list configured; pass --guests or set GUEST_DESK_GUESTS");
            (
                Default::default(),
                Some("No guest list configured. Pass --guests <FILE>.".to_string()),
            )
        }
    };

    let startup = StartupConfig {
        server_url: api.server_url().to_string(),
        snapshot,
        wedding: settings.wedding,
        load_error,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _backend = backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(api));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Guest Desk")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Guest Desk",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(ui::theme::visuals());
            Ok(Box::new(GuestDeskApp::new(cmd_tx, ui_rx, startup)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run window: {err}"))
}
