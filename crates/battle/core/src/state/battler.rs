use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::slip::SlipState;
use crate::stats::Agility;

use super::{
    BattlerId, QueuedAction, ResourceKind, ResourceMeters, Side, TpbGauge, TraitSource,
};

/// A participant in the engagement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battler {
    pub id: BattlerId,
    pub side: Side,
    pub name: String,
    pub agility: Agility,
    pub resources: ResourceMeters,
    pub gauge: TpbGauge,
    actions: ArrayVec<QueuedAction, { BattleConfig::MAX_ACTIONS }>,
    pub trait_sources: Vec<TraitSource>,
    /// Per-resource slip counters. Never persisted; starts at zero.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub slip: SlipState,
    /// Cannot move (stunned, asleep, ...). The gauge stops charging.
    pub restricted: bool,
}

impl Battler {
    pub fn new(
        id: BattlerId,
        side: Side,
        name: impl Into<String>,
        agility: u32,
        resources: ResourceMeters,
    ) -> Self {
        Self {
            id,
            side,
            name: name.into(),
            agility: Agility::new(agility),
            resources,
            gauge: TpbGauge::new(),
            actions: ArrayVec::new(),
            trait_sources: Vec::new(),
            slip: SlipState::default(),
            restricted: false,
        }
    }

    #[must_use]
    pub fn with_trait_source(mut self, source: TraitSource) -> Self {
        self.trait_sources.push(source);
        self
    }

    #[must_use]
    pub fn with_gauge(mut self, gauge: TpbGauge) -> Self {
        self.gauge = gauge;
        self
    }

    #[must_use]
    pub fn with_restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// Effective agility after buffs.
    pub fn agility(&self) -> u32 {
        self.agility.effective()
    }

    pub fn is_alive(&self) -> bool {
        self.resources.current(ResourceKind::Hp) > 0
    }

    pub fn can_move(&self) -> bool {
        self.is_alive() && !self.restricted
    }

    /// Sum of the numeric note `key` over every trait source.
    ///
    /// Sources stack additively, so `+5` and `-5` cancel to exactly 0.
    pub fn tagged_rate(&self, key: &str) -> f64 {
        self.trait_sources
            .iter()
            .map(|source| source.note_value(key))
            .sum()
    }

    pub fn add_trait_source(&mut self, source: TraitSource) {
        self.trait_sources.push(source);
    }

    /// Removes every trait source named `name`; returns how many were removed.
    pub fn remove_trait_source(&mut self, name: &str) -> usize {
        let before = self.trait_sources.len();
        self.trait_sources.retain(|source| source.name != name);
        before - self.trait_sources.len()
    }

    pub fn actions(&self) -> &[QueuedAction] {
        &self.actions
    }

    pub fn valid_actions(&self) -> impl Iterator<Item = &QueuedAction> {
        self.actions.iter().filter(|action| action.is_valid())
    }

    /// Queues an action; hands it back when the queue is full.
    pub fn queue_action(&mut self, action: QueuedAction) -> Result<(), QueuedAction> {
        self.actions
            .try_push(action)
            .map_err(|err| err.element())
    }

    pub fn invalidate_actions(&mut self) {
        for action in self.actions.iter_mut() {
            action.invalidate();
        }
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemDefinition, TraitSourceKind};

    fn battler() -> Battler {
        Battler::new(
            BattlerId(1),
            Side::Party,
            "Reid",
            40,
            ResourceMeters::at_max(500, 80),
        )
    }

    #[test]
    fn tagged_rates_stack_additively() {
        let b = battler()
            .with_trait_source(
                TraitSource::new(TraitSourceKind::Armor, "ring").with_note("slip_HP", "5"),
            )
            .with_trait_source(
                TraitSource::new(TraitSourceKind::State, "regen").with_note("slip_HP", "7"),
            )
            .with_trait_source(
                TraitSource::new(TraitSourceKind::State, "poison").with_note("slip_MP", "oops"),
            );

        assert_eq!(b.tagged_rate("slip_HP"), 12.0);
        assert_eq!(b.tagged_rate("slip_MP"), 0.0);
        assert_eq!(b.tagged_rate("slip_TP"), 0.0);
    }

    #[test]
    fn opposite_rates_cancel() {
        let b = battler()
            .with_trait_source(
                TraitSource::new(TraitSourceKind::State, "regen").with_note("slip_HP", "5"),
            )
            .with_trait_source(
                TraitSource::new(TraitSourceKind::State, "poison").with_note("slip_HP", "-5"),
            );
        assert_eq!(b.tagged_rate("slip_HP"), 0.0);
    }

    #[test]
    fn queue_rejects_overflow() {
        let mut b = battler();
        for _ in 0..BattleConfig::MAX_ACTIONS {
            b.queue_action(QueuedAction::new(ItemDefinition::new("attack", 0)))
                .unwrap();
        }
        let rejected = b
            .queue_action(QueuedAction::new(ItemDefinition::new("extra", -10)))
            .unwrap_err();
        assert_eq!(rejected.item.name, "extra");
    }

    #[test]
    fn invalidated_actions_are_filtered() {
        let mut b = battler();
        b.queue_action(QueuedAction::new(ItemDefinition::new("fire", -50)))
            .unwrap();
        assert_eq!(b.valid_actions().count(), 1);
        b.invalidate_actions();
        assert_eq!(b.valid_actions().count(), 0);
        assert_eq!(b.actions().len(), 1);
    }

    #[test]
    fn removing_source_drops_its_rate() {
        let mut b = battler().with_trait_source(
            TraitSource::new(TraitSourceKind::State, "regen").with_note("slip_HP", "5"),
        );
        assert_eq!(b.remove_trait_source("regen"), 1);
        assert_eq!(b.tagged_rate("slip_HP"), 0.0);
    }
}
