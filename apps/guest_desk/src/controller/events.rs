//! UI/backend events and error modeling for the review window.

use shared::{
    domain::{GuestId, GuestStatus, MarkAction},
    error::ApiError,
};

/// New status on success, or why the update did not happen.
pub type UpdateResult = Result<GuestStatus, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    AddressSaved {
        guest_id: GuestId,
        address: String,
        result: UpdateResult,
    },
    GuestMarked {
        guest_id: GuestId,
        action: MarkAction,
        result: UpdateResult,
    },
    Error(UiError),
}

/// Which user action a blocking notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    CopyMessage,
    CopyAndOpen,
    SaveAddress,
    MarkGuest,
}

impl FailureContext {
    pub fn generic_notice(self) -> &'static str {
        match self {
            Self::CopyMessage => "Failed to copy message",
            Self::CopyAndOpen => "Failed to copy message to clipboard",
            Self::SaveAddress => "Failed to update address",
            Self::MarkGuest => "Failed to update guest status",
        }
    }
}

/// Server rejections are shown verbatim; everything else gets the generic text.
pub fn failure_notice(context: FailureContext, error: &ApiError) -> String {
    if error.is_rejection() {
        format!("Error: {}", error.message)
    } else {
        context.generic_notice().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("runtime")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
