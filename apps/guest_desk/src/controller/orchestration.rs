//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker and records the outcome in `status`.
/// The error string is suitable for the status line.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    let guest_id = cmd.guest_id();

    let failure = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, guest_id = guest_id.0, "queued ui->backend command");
            *status = format!("Sent {cmd_name} for guest {guest_id}");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry".to_string(),
        Err(TrySendError::Disconnected(_)) => {
            "Backend request worker disconnected (possible startup/runtime failure); restart the app"
                .to_string()
        }
    };

    tracing::warn!(command = cmd_name, guest_id = guest_id.0, "{failure}");
    *status = failure.clone();
    Err(failure)
}
