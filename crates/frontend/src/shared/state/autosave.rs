//! Timer- and unload-driven draft autosave.
//!
//! While a form is mounted the controller is armed: every tick (and once on
//! `beforeunload`) the current form snapshot is written to its draft slot,
//! unless a submit is in flight. Dropping the controller disarms both
//! triggers, which is wired to the owning component's cleanup.

use super::draft_store::{DraftSlot, DraftStorage};
use gloo_timers::callback::Interval;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Periodic autosave cadence.
pub const AUTOSAVE_INTERVAL_MS: u32 = 30_000;

/// One autosave tick: persist the snapshot unless a submit is in flight.
///
/// A submit in flight must not be clobbered or duplicated by a stale
/// autosave, so the tick is a no-op while `is_submitting` is set. A storage
/// failure (quota, disabled storage) is logged once per session and then
/// muted; autosave keeps trying on later ticks.
pub fn autosave_tick<T, S>(
    slot: &mut DraftSlot<T, S>,
    snapshot: &T,
    is_submitting: bool,
    warned: &mut bool,
) where
    T: Serialize + DeserializeOwned,
    S: DraftStorage,
{
    if is_submitting {
        return;
    }
    if let Err(e) = slot.save(snapshot) {
        if !*warned {
            log::warn!("autosave failed, drafts may be lost: {}", e);
            *warned = true;
        }
    }
}

/// Arms the periodic save and the page-exit save; disarms both on drop.
pub struct AutosaveController {
    interval: Option<Interval>,
    unload: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl AutosaveController {
    pub fn start(interval_ms: u32, tick: impl FnMut() + 'static) -> Self {
        let tick = Rc::new(RefCell::new(tick));

        let interval = {
            let tick = tick.clone();
            Interval::new(interval_ms, move || (tick.borrow_mut())())
        };

        let unload = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| (tick.borrow_mut())());
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("beforeunload", unload.as_ref().unchecked_ref());
        }

        Self {
            interval: Some(interval),
            unload: Some(unload),
        }
    }
}

impl Drop for AutosaveController {
    fn drop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
        if let Some(unload) = self.unload.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "beforeunload",
                    unload.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::draft_store::{MemoryStore, StorageError};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestForm {
        title: String,
    }

    #[test]
    fn test_tick_skips_save_while_submitting() {
        let mut slot: DraftSlot<TestForm, MemoryStore> =
            DraftSlot::new("draft:autosave", MemoryStore::default());
        let seeded = TestForm {
            title: "до отправки".to_string(),
        };
        slot.save_at(&seeded, 100).unwrap();
        let raw_before = slot.raw();

        let mut warned = false;
        let pending = TestForm {
            title: "изменено во время отправки".to_string(),
        };
        autosave_tick(&mut slot, &pending, true, &mut warned);

        assert_eq!(slot.raw(), raw_before);
        assert!(!warned);
    }

    #[test]
    fn test_tick_persists_snapshot_when_idle() {
        let mut slot: DraftSlot<TestForm, MemoryStore> =
            DraftSlot::new("draft:autosave", MemoryStore::default());
        let mut warned = false;
        let snapshot = TestForm {
            title: "автосохранение".to_string(),
        };
        autosave_tick(&mut slot, &snapshot, false, &mut warned);

        assert_eq!(slot.load(), Some(snapshot));
        assert!(!warned);
    }

    /// Backend that rejects every write, as a quota-exhausted origin would.
    struct FullStore;

    impl DraftStorage for FullStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("QuotaExceededError".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_warns_once_then_mutes() {
        let mut slot: DraftSlot<TestForm, FullStore> = DraftSlot::new("draft:autosave", FullStore);
        let snapshot = TestForm {
            title: "не влезает".to_string(),
        };

        let mut warned = false;
        autosave_tick(&mut slot, &snapshot, false, &mut warned);
        assert!(warned);

        // later ticks keep trying but stay quiet
        autosave_tick(&mut slot, &snapshot, false, &mut warned);
        assert!(warned);
    }
}
