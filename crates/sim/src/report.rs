//! Per-battler summary of a simulated engagement.

use std::collections::BTreeMap;
use std::fmt;

use tpb_core::{BattleState, BattlerId, Frame, ResourceKind, Roster, Side};

#[derive(Debug, serde::Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub battlers: BTreeMap<u32, BattlerSummary>,
}

#[derive(Debug, serde::Serialize)]
pub struct BattlerSummary {
    pub name: String,
    pub side: Side,
    pub agility: u32,
    pub actions: u32,
    /// Current value at the start, indexed HP, MP, TP.
    pub start: [u32; 3],
    pub end: [u32; 3],
    pub defeated_at: Option<u64>,
}

impl BattlerSummary {
    /// Net change of `kind` over the run.
    pub fn net(&self, kind: ResourceKind) -> i64 {
        i64::from(self.end[kind.index()]) - i64::from(self.start[kind.index()])
    }
}

impl SimulationReport {
    pub fn start(roster: &Roster) -> Self {
        let battlers = roster
            .iter()
            .map(|b| {
                let values = ResourceKind::ALL.map(|kind| b.resources.current(kind));
                (
                    b.id.0,
                    BattlerSummary {
                        name: b.name.clone(),
                        side: b.side,
                        agility: b.agility(),
                        actions: 0,
                        start: values,
                        end: values,
                        defeated_at: None,
                    },
                )
            })
            .collect();
        Self {
            frames: 0,
            battlers,
        }
    }

    pub fn record_action(&mut self, id: BattlerId) {
        if let Some(summary) = self.battlers.get_mut(&id.0) {
            summary.actions += 1;
        }
    }

    pub fn record_defeat(&mut self, id: BattlerId, frame: Frame) {
        if let Some(summary) = self.battlers.get_mut(&id.0) {
            summary.defeated_at = Some(frame.0);
            summary.end[ResourceKind::Hp.index()] = 0;
        }
    }

    pub fn finish(&mut self, state: &BattleState) {
        self.frames = state.frame.0;
        for b in state.roster.iter() {
            if let Some(summary) = self.battlers.get_mut(&b.id.0) {
                summary.end = ResourceKind::ALL.map(|kind| b.resources.current(kind));
                summary.agility = b.agility();
            }
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(
            f,
            "{:>4}  {:<12} {:<6} {:>5} {:>7} {:>7} {:>7} {:>7}",
            "id", "name", "side", "agi", "actions", "ΔHP", "ΔMP", "ΔTP"
        )?;
        for (id, b) in &self.battlers {
            let side: &'static str = b.side.into();
            write!(
                f,
                "{:>4}  {:<12} {:<6} {:>5} {:>7} {:>+7} {:>+7} {:>+7}",
                id,
                b.name,
                side,
                b.agility,
                b.actions,
                b.net(ResourceKind::Hp),
                b.net(ResourceKind::Mp),
                b.net(ResourceKind::Tp),
            )?;
            match b.defeated_at {
                Some(frame) => writeln!(f, "  defeated at frame {frame}")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tpb_core::{Battler, ResourceMeters};

    use super::*;

    #[test]
    fn net_change_and_defeat_are_reported() {
        let mut roster = Roster::new();
        roster
            .insert(Battler::new(
                BattlerId(1),
                Side::Party,
                "Reid",
                50,
                ResourceMeters::at_max(100, 20),
            ))
            .unwrap();
        roster
            .insert(Battler::new(
                BattlerId(2),
                Side::Troop,
                "Slime",
                10,
                ResourceMeters::at_max(30, 0),
            ))
            .unwrap();
        let mut report = SimulationReport::start(&roster);

        let mut state = BattleState::new(roster);
        state
            .roster
            .get_mut(BattlerId(1))
            .unwrap()
            .resources
            .gain(ResourceKind::Mp, -5);
        state.roster.remove(BattlerId(2));
        state.frame = Frame(90);

        report.record_action(BattlerId(1));
        report.record_defeat(BattlerId(2), Frame(80));
        report.finish(&state);

        let reid = &report.battlers[&1];
        assert_eq!(reid.actions, 1);
        assert_eq!(reid.net(ResourceKind::Mp), -5);
        let slime = &report.battlers[&2];
        assert_eq!(slime.net(ResourceKind::Hp), -30);
        assert_eq!(slime.defeated_at, Some(80));
        assert_eq!(report.frames, 90);

        let text = report.to_string();
        assert!(text.contains("defeated at frame 80"));
    }
}
