/// Skill or item definition as far as timing is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    /// Speed correction. Negative values add charge delay of `-speed`;
    /// zero and positive values add none.
    pub speed: i32,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, speed: i32) -> Self {
        Self {
            name: name.into(),
            speed,
        }
    }

    /// `max(0, -speed)`
    pub fn charge_delay(&self) -> u32 {
        if self.speed < 0 {
            self.speed.unsigned_abs()
        } else {
            0
        }
    }
}

/// An action a battler has decided on but not yet executed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub item: ItemDefinition,
    valid: bool,
}

impl QueuedAction {
    pub fn new(item: ItemDefinition) -> Self {
        Self { item, valid: true }
    }

    /// Whether the host still considers this action executable.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Marks the action as no longer executable (target gone, item unusable).
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}
