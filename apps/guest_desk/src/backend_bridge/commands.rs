//! Backend commands queued from UI to backend worker.

use shared::domain::{GuestId, MarkAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    UpdateAddress { guest_id: GuestId, address: String },
    MarkGuest { guest_id: GuestId, action: MarkAction },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateAddress { .. } => "update_guest_address",
            Self::MarkGuest { .. } => "mark_guest",
        }
    }

    pub fn guest_id(&self) -> GuestId {
        match self {
            Self::UpdateAddress { guest_id, .. } | Self::MarkGuest { guest_id, .. } => *guest_id,
        }
    }
}
