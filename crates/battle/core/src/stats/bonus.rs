//! Bonus application for buffable attributes.
//!
//! Calculation order: Flat → %Inc → More → Less → Clamp

/// A single buff or debuff applied to an attribute.
///
/// - **Flat**: additive, applied first (e.g. +20 AGI from boots)
/// - **Increased**: percentages summed, then multiplied (e.g. +25% haste)
/// - **More**: sequential multipliers (50 = ×1.5)
/// - **Less**: sequential reductions (10 = ×0.9)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    Increased(i32),
    More(i32),
    Less(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: i32) -> Self {
        Bonus::Less(percent)
    }
}

/// A collection of bonuses applied in a fixed order.
///
/// # Example
/// ```
/// # use tpb_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5));
/// stack.add(Bonus::increased(20));
/// stack.add(Bonus::increased(15));
/// stack.add(Bonus::more(50));
/// stack.add(Bonus::less(10));
///
/// // clamp((10 + 5) × 1.35 × 1.5 × 0.9, 5, 100) = 27
/// assert_eq!(stack.apply(10, 5, 100), 27);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    pub fn clear(&mut self) {
        self.bonuses.clear();
    }

    /// Apply all bonuses to a base value with clamping.
    ///
    /// ```text
    /// result = clamp((base + flat_sum) × (1 + inc_sum/100) × more_product × less_product, min, max)
    /// ```
    ///
    /// Intermediate values are widened to `i64` and saturate, so extreme
    /// bonuses land on the clamp bounds instead of overflowing.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let values = |select: fn(&Bonus) -> Option<i32>| {
            self.bonuses
                .iter()
                .filter_map(select)
                .map(i64::from)
        };

        let flat_sum = values(|b| match b {
            Bonus::Flat(v) => Some(*v),
            _ => None,
        })
        .fold(0i64, i64::saturating_add);

        let inc_sum = values(|b| match b {
            Bonus::Increased(p) => Some(*p),
            _ => None,
        })
        .fold(0i64, i64::saturating_add);

        let scale =
            |acc: i64, percent: i64| acc.saturating_mul(100i64.saturating_add(percent)) / 100;

        let after_flat = i64::from(base).saturating_add(flat_sum);
        let after_inc = if inc_sum == 0 {
            after_flat
        } else {
            scale(after_flat, inc_sum)
        };

        let after_more = values(|b| match b {
            Bonus::More(p) => Some(*p),
            _ => None,
        })
        .fold(after_inc, scale);

        let after_less = values(|b| match b {
            Bonus::Less(p) => Some(*p),
            _ => None,
        })
        .fold(after_more, |acc, less_percent| scale(acc, -less_percent));

        // Clamped into [min, max], so the narrowing cannot truncate.
        after_less.clamp(i64::from(min), i64::from(max)) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Builder methods for constructing bonus stacks fluently.
impl BonusStack {
    pub fn flat(mut self, value: i32) -> Self {
        self.add(Bonus::flat(value));
        self
    }

    pub fn increased(mut self, percent: i32) -> Self {
        self.add(Bonus::increased(percent));
        self
    }

    pub fn more(mut self, percent: i32) -> Self {
        self.add(Bonus::more(percent));
        self
    }

    pub fn less(mut self, percent: i32) -> Self {
        self.add(Bonus::less(percent));
        self
    }
}

/// Clamp bounds for a buffable attribute.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Agility bounds [1, 9999].
    ///
    /// The floor of 1 keeps the roster's base fill rate strictly positive.
    pub const AGILITY: Self = Self { min: 1, max: 9999 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_only_clamps() {
        let stack = BonusStack::new();
        assert_eq!(stack.apply(50, 1, 9999), 50);
        assert_eq!(stack.apply(0, 1, 9999), 1);
    }

    #[test]
    fn less_applies_after_more() {
        let stack = BonusStack::new().more(100).less(50);
        // 40 × 2 = 80, then × 0.5 = 40
        assert_eq!(stack.apply(40, 1, 9999), 40);
    }

    #[test]
    fn debuff_cannot_drop_below_floor() {
        let stack = BonusStack::new().flat(-500);
        let bounds = StatBounds::AGILITY;
        assert_eq!(stack.apply(30, bounds.min, bounds.max), 1);
    }

    #[test]
    fn huge_bonuses_saturate_to_bounds() {
        let bounds = StatBounds::AGILITY;
        let haste = BonusStack::new().increased(1_000_000);
        assert_eq!(haste.apply(9999, bounds.min, bounds.max), 9999);

        let boots = BonusStack::new().flat(i32::MAX).flat(i32::MAX);
        assert_eq!(boots.apply(9999, bounds.min, bounds.max), 9999);

        let stacked = BonusStack::new().flat(i32::MAX).more(i32::MAX).more(i32::MAX);
        assert_eq!(stacked.apply(1, bounds.min, bounds.max), 9999);

        let slowed = BonusStack::new().increased(1_000_000).less(i32::MAX);
        assert_eq!(slowed.apply(50, bounds.min, bounds.max), 1);
    }
}
