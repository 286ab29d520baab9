use super::{Battler, BattlerId, Side};

/// Everyone taking part in the engagement, split by side.
///
/// Membership changes only at engagement setup ([`Roster::insert`]) and when a
/// battler is defeated or retreats ([`Roster::remove`]).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    party: Vec<Battler>,
    troop: Vec<Battler>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a battler to its side. Returns it back if the id is taken.
    pub fn insert(&mut self, battler: Battler) -> Result<(), Battler> {
        if self.contains(battler.id) {
            return Err(battler);
        }
        match battler.side {
            Side::Party => self.party.push(battler),
            Side::Troop => self.troop.push(battler),
        }
        Ok(())
    }

    /// Removes a battler; its slip and gauge state go with it.
    pub fn remove(&mut self, id: BattlerId) -> Option<Battler> {
        for members in [&mut self.party, &mut self.troop] {
            if let Some(index) = members.iter().position(|b| b.id == id) {
                return Some(members.remove(index));
            }
        }
        None
    }

    /// Removes every battler whose HP reached 0; returns their ids.
    pub fn remove_defeated(&mut self) -> Vec<BattlerId> {
        let defeated: Vec<BattlerId> = self
            .iter()
            .filter(|b| !b.is_alive())
            .map(|b| b.id)
            .collect();
        self.party.retain(Battler::is_alive);
        self.troop.retain(Battler::is_alive);
        defeated
    }

    pub fn contains(&self, id: BattlerId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: BattlerId) -> Option<&Battler> {
        self.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BattlerId) -> Option<&mut Battler> {
        self.party
            .iter_mut()
            .chain(self.troop.iter_mut())
            .find(|b| b.id == id)
    }

    /// Party first, then troop, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Battler> {
        self.party.iter().chain(self.troop.iter())
    }

    pub fn ids(&self) -> Vec<BattlerId> {
        self.iter().map(|b| b.id).collect()
    }

    pub fn side(&self, side: Side) -> &[Battler] {
        match side {
            Side::Party => &self.party,
            Side::Troop => &self.troop,
        }
    }

    pub fn len(&self) -> usize {
        self.party.len() + self.troop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
