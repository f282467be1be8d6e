//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::GuestApi;
use crossbeam_channel::{Receiver, Sender};
use shared::error::ApiError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task, so a
/// slow request never holds up the next one and responses arrive in
/// completion order.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn GuestApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(api.as_ref(), cmd).await;
                    if let Err(err) = ui_tx.try_send(event) {
                        tracing::warn!("discarding backend result: {err}");
                    }
                });
            }
            tracing::info!("command queue closed; backend worker stopping");
        });
    })
}

pub(crate) async fn run_command(api: &dyn GuestApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::UpdateAddress { guest_id, address } => {
            let result = api
                .update_address(guest_id, &address)
                .await
                .map_err(ApiError::from);
            // The server echoes the stored value; fall back to what was sent.
            let (address, result) = match result {
                Ok(change) => (
                    change.new_address.unwrap_or(address),
                    Ok(change.new_status),
                ),
                Err(err) => (address, Err(err)),
            };
            UiEvent::AddressSaved {
                guest_id,
                address,
                result,
            }
        }
        BackendCommand::MarkGuest { guest_id, action } => UiEvent::GuestMarked {
            guest_id,
            action,
            result: api
                .mark_guest(guest_id, action)
                .await
                .map(|change| change.new_status)
                .map_err(ApiError::from),
        },
    }
}
