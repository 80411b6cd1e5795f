//! Snapshot persistence
//!
//! The tracker hands its whole state to a [`SnapshotStore`] after every
//! change. Stores deal in one JSON blob under a fixed key; a blob that
//! does not decode is treated as if nothing had been saved.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::error::Result;
use crate::tracker::TrackerState;

/// What gets saved: roster, mode and turn pointer
pub type TrackerSnapshot = TrackerState;

/// Key-value blob store holding the latest snapshot
pub trait SnapshotStore {
    /// Latest snapshot, or `None` if nothing usable is stored
    fn load(&self) -> Option<TrackerSnapshot>;

    /// Replace the stored snapshot
    fn save(&mut self, snapshot: &TrackerSnapshot) -> Result<()>;

    /// Forget the stored snapshot
    fn clear(&mut self) -> Result<()>;
}

/// Serialize a snapshot to its stored JSON form
pub fn encode(snapshot: &TrackerSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parse a stored blob; malformed data is logged and reported as absent
pub fn decode(blob: &str) -> Option<TrackerSnapshot> {
    match serde_json::from_str(blob) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!("Ignoring malformed tracker snapshot: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Mode;

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not json").is_none());
        assert!(decode("[1, 2, 3]").is_none());
        assert!(decode(r#"{"combatants": "nope"}"#).is_none());
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let snapshot = decode(r#"{"current_turn_index": 2}"#).unwrap();
        assert!(snapshot.combatants.is_empty());
        assert_eq!(snapshot.mode, Mode::Exploration);
        assert_eq!(snapshot.current_turn_index, 2);
    }

    #[test]
    fn test_encode_decode_keeps_mode() {
        let snapshot = TrackerSnapshot {
            mode: Mode::Combat,
            ..TrackerSnapshot::default()
        };
        let blob = encode(&snapshot).unwrap();
        assert_eq!(decode(&blob), Some(snapshot));
    }
}
