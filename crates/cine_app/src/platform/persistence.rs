//! Favorites and search history in durable local storage.
//!
//! Storage problems never reach the state machine: reads fall back to empty
//! defaults and failed writes are logged.

use cine_core::Movie;
use cine_engine::{PersistError, SlotStore};
use cine_logging::{cine_error, cine_info, cine_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) const FAVORITES_SLOT: &str = "movieFavorites";
pub(crate) const HISTORY_SLOT: &str = "searchHistory";

pub(crate) fn load_favorites(store: &impl SlotStore) -> Vec<Movie> {
    load_or_default(store, FAVORITES_SLOT)
}

pub(crate) fn load_search_history(store: &impl SlotStore) -> Vec<String> {
    load_or_default(store, HISTORY_SLOT)
}

pub(crate) fn save_favorites(store: &impl SlotStore, favorites: &[Movie]) {
    save_or_log(store, FAVORITES_SLOT, favorites);
}

pub(crate) fn save_search_history(store: &impl SlotStore, history: &[String]) {
    save_or_log(store, HISTORY_SLOT, history);
}

fn load_or_default<T: DeserializeOwned + Default>(store: &impl SlotStore, slot: &str) -> T {
    match load_slot(store, slot) {
        Ok(Some(value)) => {
            cine_info!("Loaded persisted slot {}", slot);
            value
        }
        Ok(None) => T::default(),
        Err(err) => {
            cine_warn!("Ignoring persisted slot {}: {}", slot, err);
            T::default()
        }
    }
}

fn load_slot<T: DeserializeOwned>(store: &impl SlotStore, slot: &str) -> Result<Option<T>, PersistError> {
    let Some(content) = store.read_slot(slot)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&content)?))
}

fn save_or_log<T: Serialize + ?Sized>(store: &impl SlotStore, slot: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(PersistError::from)
        .and_then(|content| store.write_slot(slot, &content));
    if let Err(err) = result {
        cine_error!("Failed to persist slot {}: {}", slot, err);
    }
}
