//! Loading the exported guest list shown in the review window.

use std::{fs, path::Path};

use anyhow::Context;
use shared::protocol::ReviewSnapshot;

pub fn load_review_snapshot(path: &Path) -> anyhow::Result<ReviewSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read guest list {}", path.display()))?;
    let snapshot: ReviewSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("invalid guest list {}", path.display()))?;
    tracing::info!(
        guests = snapshot.guests.len(),
        path = %path.display(),
        "loaded guest list"
    );
    Ok(snapshot)
}
