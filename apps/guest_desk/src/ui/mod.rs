//! UI layer for the review window: app shell and theme.

pub mod app;
pub mod theme;

pub use app::{GuestDeskApp, StartupConfig};
