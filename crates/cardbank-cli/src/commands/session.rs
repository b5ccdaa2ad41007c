//! Session commands - inspect or erase the persisted session

use anyhow::Context;
use cardbank_portal::{FileStorage, SessionStore};
use cardbank_types::mask_card;
use std::path::Path;
use std::sync::Arc;

use crate::display;

fn store_at(path: &Path) -> SessionStore {
    SessionStore::new(Arc::new(FileStorage::new(path)))
}

/// Show the persisted session
pub fn show(path: &Path) -> anyhow::Result<()> {
    let session = store_at(path)
        .restore_session()
        .with_context(|| format!("reading session from {}", path.display()))?;

    display::section("Persisted Session");
    display::kv("Storage", &path.display().to_string());
    match session.role {
        Some(role) => {
            display::kv("Role", role.as_str());
            match session.active_card() {
                Some(card) => display::kv("Card", &mask_card(card)),
                None => display::kv("Card", "-"),
            }
        }
        None => display::info("Signed out"),
    }
    println!();
    Ok(())
}

/// Erase the persisted session, the same as logging out
pub fn clear(path: &Path) -> anyhow::Result<()> {
    store_at(path)
        .clear_session()
        .with_context(|| format!("clearing session at {}", path.display()))?;
    display::success("Session cleared");
    Ok(())
}
