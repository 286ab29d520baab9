//! Battler attributes read by the speed model.
//!
//! Only agility matters to the gauge. It is stored as a base value plus a
//! [`BonusStack`] of buffs and debuffs and resolved on every read, so a buff
//! applied mid-engagement changes the roster spread on the very next tick.

pub mod agility;
pub mod bonus;

pub use agility::Agility;
pub use bonus::{Bonus, BonusStack, StatBounds};
