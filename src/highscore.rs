//! Persisted high score
//!
//! One integer in LocalStorage, stored as decimal text. Reads fall back to
//! zero on anything unexpected; writes are fire-and-forget.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "phosphor-pit-snake-high-score";

/// Load the stored high score. Absent, unreadable, or non-numeric values
/// all read as zero; none of them is an error.
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(text)) = storage.get_item(STORAGE_KEY) {
            if let Ok(score) = text.trim().parse() {
                log::info!("Loaded high score: {score}");
                return score;
            }
            log::warn!("Ignoring unparseable stored high score: {text:?}");
        }
    }
    0
}

/// Write the high score through to LocalStorage. Storage failures (quota,
/// private browsing) are logged and dropped; the game never waits on this.
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if storage.set_item(STORAGE_KEY, &score.to_string()).is_err() {
            log::warn!("Failed to persist high score {score}");
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
