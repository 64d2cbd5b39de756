//! # Location Store
//!
//! Holds the delivery location and the location picker's open flag, and
//! mirrors the location into durable storage.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Location Store Lifecycle                             │
//! │                                                                         │
//! │  LocationStore::new(storage)                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  storage.get("tiffin.location")                                        │
//! │      ├── None ──────────────────► location absent                       │
//! │      ├── Some(valid json) ──────► location restored                     │
//! │      ├── Some(garbage) ─────────► remove key, location absent (warn)    │
//! │      └── read error ────────────► location absent (warn)                │
//! │                                                                         │
//! │  set_location(loc) ── state ← loc, modal closed ── storage.set(json)    │
//! │  clear_location()  ── state ← absent ──────────── storage.remove(key)   │
//! │                                                                         │
//! │  The in-memory state changes first; a failed write is logged and       │
//! │  returned, never rolled back.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tiffin_core::{Location, LOCATION_STORAGE_KEY};
use tiffin_storage::DurableStorage;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::StateResult;

/// Snapshot published by [`LocationStore`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocationState {
    /// Selected delivery location.
    pub location: Option<Location>,

    /// Whether the location picker is showing.
    pub modal_open: bool,
}

/// The session's location container.
#[derive(Debug)]
pub struct LocationStore {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<LocationState>,
}

impl LocationStore {
    /// Creates the store, restoring any stored location.
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let location = load_stored_location(storage.as_ref());
        let (state, _) = watch::channel(LocationState {
            location,
            modal_open: false,
        });

        LocationStore { storage, state }
    }

    /// Selects a location, stores it, and closes the picker.
    ///
    /// ## Errors
    /// The location is selected even when the write fails; the failure is
    /// returned so the caller can tell the user it will not be remembered.
    pub fn set_location(&self, location: Location) -> StateResult<()> {
        let record = location.to_record();

        info!(city = %location.city, area = %location.area, "Delivery location selected");
        self.state.send_modify(|state| {
            state.location = Some(location);
            state.modal_open = false;
        });

        let record = record.inspect_err(|e| {
            warn!(error = %e, "Could not encode location record");
        })?;

        self.storage
            .set(LOCATION_STORAGE_KEY, &record)
            .inspect_err(|e| warn!(error = %e, "Could not store location"))?;

        debug!(key = LOCATION_STORAGE_KEY, "Location stored");
        Ok(())
    }

    /// Forgets the location, in memory and in storage.
    pub fn clear_location(&self) -> StateResult<()> {
        info!("Delivery location cleared");
        self.state.send_modify(|state| state.location = None);

        self.storage
            .remove(LOCATION_STORAGE_KEY)
            .inspect_err(|e| warn!(error = %e, "Could not remove stored location"))?;

        Ok(())
    }

    /// Shows the location picker.
    pub fn open_location_modal(&self) {
        debug!("Opening location modal");
        self.set_modal_open(true);
    }

    /// Hides the location picker.
    pub fn close_location_modal(&self) {
        debug!("Closing location modal");
        self.set_modal_open(false);
    }

    fn set_modal_open(&self, open: bool) {
        self.state.send_modify(|state| state.modal_open = open);
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> LocationState {
        self.state.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.subscribe()
    }

    /// Selected location, if any.
    pub fn location(&self) -> Option<Location> {
        self.state.borrow().location.clone()
    }

    /// Checks if a location is selected.
    pub fn has_location(&self) -> bool {
        self.state.borrow().location.is_some()
    }

    /// Checks if the picker is showing.
    pub fn is_modal_open(&self) -> bool {
        self.state.borrow().modal_open
    }
}

/// Reads the stored location. Never fails: anything unusable means "absent".
fn load_stored_location(storage: &dyn DurableStorage) -> Option<Location> {
    let raw = match storage.get(LOCATION_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored location");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Could not read stored location");
            return None;
        }
    };

    match Location::from_record(&raw) {
        Ok(location) => {
            debug!(city = %location.city, "Restored stored location");
            Some(location)
        }
        Err(e) => {
            warn!(error = %e, "Stored location is corrupt, discarding it");
            if let Err(e) = storage.remove(LOCATION_STORAGE_KEY) {
                warn!(error = %e, "Could not remove corrupt location");
            }
            None
        }
    }
}
