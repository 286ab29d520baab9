use super::bonus::{Bonus, BonusStack, StatBounds};

/// Agility attribute: base value plus active buffs and debuffs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agility {
    base: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    bonuses: BonusStack,
}

impl Agility {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            bonuses: BonusStack::new(),
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn set_base(&mut self, base: u32) {
        self.base = base;
    }

    pub fn bonuses(&self) -> &BonusStack {
        &self.bonuses
    }

    pub fn add_bonus(&mut self, bonus: Bonus) {
        self.bonuses.add(bonus);
    }

    pub fn clear_bonuses(&mut self) {
        self.bonuses.clear();
    }

    /// Effective agility after bonuses, clamped to [`StatBounds::AGILITY`].
    pub fn effective(&self) -> u32 {
        let bounds = StatBounds::AGILITY;
        let base = self.base.min(bounds.max as u32) as i32;
        self.bonuses.apply(base, bounds.min, bounds.max) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buff_changes_effective_value_only() {
        let mut agility = Agility::new(60);
        agility.add_bonus(Bonus::increased(50));
        assert_eq!(agility.base(), 60);
        assert_eq!(agility.effective(), 90);

        agility.clear_bonuses();
        assert_eq!(agility.effective(), 60);
    }

    #[test]
    fn oversized_base_is_clamped() {
        assert_eq!(Agility::new(u32::MAX).effective(), 9999);
    }
}
