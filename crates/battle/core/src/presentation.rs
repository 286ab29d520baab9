//! Presentation policies the core signals but does not perform.

/// Sound effect played when a party battler's gauge becomes full.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundCue {
    pub name: String,
    /// 0–100
    pub volume: u8,
    /// 50–150
    pub pitch: u8,
    /// −100–100
    pub pan: i8,
}

impl SoundCue {
    pub const DEFAULT_VOLUME: i32 = 90;
    pub const DEFAULT_PITCH: i32 = 100;
    pub const DEFAULT_PAN: i32 = 0;

    /// Creates a cue, clamping each setting into its valid range.
    pub fn new(name: impl Into<String>, volume: i32, pitch: i32, pan: i32) -> Self {
        Self {
            name: name.into(),
            volume: volume.clamp(0, 100) as u8,
            pitch: pitch.clamp(50, 150) as u8,
            pan: pan.clamp(-100, 100) as i8,
        }
    }

    /// Cue with default volume, pitch and pan.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Self::DEFAULT_VOLUME,
            Self::DEFAULT_PITCH,
            Self::DEFAULT_PAN,
        )
    }
}

/// Whether a battle animation should be drawn mirrored.
///
/// Names starting with `!` are never mirrored; every other animation keeps the
/// host's facing decision.
pub fn should_mirror(animation_name: &str, host_mirror: bool) -> bool {
    host_mirror && !animation_name.starts_with('!')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_settings_are_clamped() {
        let cue = SoundCue::new("Bell1", 250, 10, -400);
        assert_eq!(cue.volume, 100);
        assert_eq!(cue.pitch, 50);
        assert_eq!(cue.pan, -100);

        let named = SoundCue::named("Chime2");
        assert_eq!((named.volume, named.pitch, named.pan), (90, 100, 0));
    }

    #[test]
    fn bang_prefix_suppresses_mirroring() {
        assert!(!should_mirror("!Fire", true));
        assert!(!should_mirror("!Fire", false));
        assert!(should_mirror("Fire", true));
        assert!(!should_mirror("Fire", false));
        assert!(should_mirror("Fire!", true));
        assert!(should_mirror("", true));
    }
}
