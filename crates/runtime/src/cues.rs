//! Presentation cue dispatch.
//!
//! The core only reports that a gauge became full; sinks registered with the
//! runtime decide how a [`SoundCue`] is actually played.

use std::sync::{Arc, Mutex, PoisonError};

use tpb_core::{BattlerId, SoundCue};
use tracing::info;

/// Receives cues for party battlers whose gauge became full.
pub trait CueSink: Send + Sync {
    fn play(&self, battler: BattlerId, cue: &SoundCue);
}

/// Logs every cue under the `runtime::cues` target.
#[derive(Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&self, battler: BattlerId, cue: &SoundCue) {
        info!(
            target: "runtime::cues",
            battler = %battler,
            name = %cue.name,
            volume = cue.volume,
            pitch = cue.pitch,
            pan = cue.pan,
            "Play sound cue"
        );
    }
}

/// Keeps every cue it receives; clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct RecordingCueSink {
    played: Arc<Mutex<Vec<(BattlerId, SoundCue)>>>,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<(BattlerId, SoundCue)> {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CueSink for RecordingCueSink {
    fn play(&self, battler: BattlerId, cue: &SoundCue) {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((battler, cue.clone()));
    }
}
