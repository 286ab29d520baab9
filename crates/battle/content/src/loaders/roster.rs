//! Roster loader.
//!
//! Loads battlers (both party and troop) from RON files together with their
//! trait sources and the skill each one uses when its gauge fills.

use std::collections::BTreeMap;
use std::path::Path;

use tpb_core::{
    Battler, BattlerId, ItemDefinition, ResourceMeter, ResourceMeters, Roster, Side, TpbGauge,
    TraitSource, TraitSourceKind,
};

use crate::loaders::{LoadResult, read_file};

/// Top-level RON document.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct RosterSpec {
    pub battlers: Vec<BattlerSpec>,
}

/// One battler as authored.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BattlerSpec {
    pub id: u32,
    pub side: Side,
    pub name: String,
    pub agility: u32,
    pub hp: u32,
    #[serde(default)]
    pub mp: u32,
    #[serde(default)]
    pub tp: u32,
    #[serde(default = "default_tp_max")]
    pub tp_max: u32,
    /// Initial gauge fill in [0, 1].
    #[serde(default)]
    pub charge: f64,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default = "default_skill")]
    pub skill: ItemDefinition,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// A trait source with raw note text, e.g. `"<slip_HP:-5>"`.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct SourceSpec {
    pub kind: TraitSourceKind,
    pub name: String,
    #[serde(default)]
    pub note: String,
}

fn default_tp_max() -> u32 {
    ResourceMeters::DEFAULT_TP_MAX
}

fn default_skill() -> ItemDefinition {
    ItemDefinition::new("Attack", 0)
}

impl BattlerSpec {
    pub fn build(&self) -> Battler {
        let resources = ResourceMeters::new(
            ResourceMeter::full(self.hp),
            ResourceMeter::full(self.mp),
            ResourceMeter::new(self.tp, self.tp_max),
        );
        self.sources.iter().fold(
            Battler::new(
                BattlerId(self.id),
                self.side,
                self.name.clone(),
                self.agility,
                resources,
            )
            .with_gauge(TpbGauge::with_charge(self.charge))
            .with_restricted(self.restricted),
            |battler, source| {
                battler.with_trait_source(TraitSource::from_note(
                    source.kind,
                    source.name.clone(),
                    &source.note,
                ))
            },
        )
    }
}

/// A roster ready for an engagement plus each battler's chosen skill.
#[derive(Clone, Debug)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub skills: BTreeMap<BattlerId, ItemDefinition>,
}

impl LoadedRoster {
    pub fn skill(&self, id: BattlerId) -> Option<&ItemDefinition> {
        self.skills.get(&id)
    }
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `(battlers: [BattlerSpec, ...])`
    pub fn load(path: &Path) -> LoadResult<LoadedRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from RON text.
    ///
    /// Fails on an empty roster or on duplicate battler ids.
    pub fn parse(content: &str) -> LoadResult<LoadedRoster> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if spec.battlers.is_empty() {
            anyhow::bail!("Roster has no battlers");
        }

        let mut roster = Roster::new();
        let mut skills = BTreeMap::new();
        for battler_spec in &spec.battlers {
            let battler = battler_spec.build();
            let id = battler.id;
            roster.insert(battler).map_err(|rejected| {
                anyhow::anyhow!(
                    "Duplicate battler id {} ('{}')",
                    rejected.id,
                    rejected.name
                )
            })?;
            skills.insert(id, battler_spec.skill.clone());
        }

        Ok(LoadedRoster { roster, skills })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use tpb_core::ResourceKind;

    use super::*;

    const ROSTER: &str = r#"
(
    battlers: [
        (
            id: 1,
            side: Party,
            name: "Reid",
            agility: 120,
            hp: 450,
            mp: 60,
            skill: (name: "Fire", speed: -40),
            sources: [
                (kind: Armor, name: "Ring of Life", note: "<slip_HP:5>"),
                (kind: State, name: "Focus", note: "<slip_MP:2.5><boss>"),
            ],
        ),
        (id: 2, side: Troop, name: "Slime", agility: 40, hp: 80, charge: 0.5),
    ],
)
"#;

    #[test]
    fn loads_roster_with_sources_and_skills() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let loaded = RosterLoader::load(file.path()).unwrap();
        assert_eq!(loaded.roster.len(), 2);

        let reid = loaded.roster.get(BattlerId(1)).unwrap();
        assert_eq!(reid.agility(), 120);
        assert_eq!(reid.resources.current(ResourceKind::Mp), 60);
        assert_eq!(reid.resources.current(ResourceKind::Tp), 0);
        assert_eq!(reid.resources.maximum(ResourceKind::Tp), 100);
        assert_eq!(reid.tagged_rate("slip_HP"), 5.0);
        assert_eq!(reid.tagged_rate("slip_MP"), 2.5);
        assert_eq!(reid.tagged_rate("boss"), 0.0);
        assert_eq!(loaded.skill(BattlerId(1)).unwrap().speed, -40);

        let slime = loaded.roster.get(BattlerId(2)).unwrap();
        assert_eq!(slime.side, Side::Troop);
        assert_eq!(slime.gauge.charge, 0.5);
        assert_eq!(loaded.skill(BattlerId(2)).unwrap().name, "Attack");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = RosterLoader::parse(
            r#"(battlers: [
                (id: 3, side: Party, name: "A", agility: 10, hp: 10),
                (id: 3, side: Troop, name: "B", agility: 10, hp: 10),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate battler id #3"));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(RosterLoader::parse("(battlers: [])").is_err());
    }
}
