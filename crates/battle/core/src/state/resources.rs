//! Resource pools (HP, MP, TP).
//!
//! Every mutation goes through [`ResourceMeters::gain`], which clamps to
//! `[0, maximum]` and reports what actually changed. Slip callers never feed
//! the clamped amount back into their carry.

use strum::EnumCount;

/// Enum representing individual resource types.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumCount, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Depletable vitality; reaching 0 defeats the battler.
    #[strum(serialize = "HP")]
    Hp,
    /// Depletable skill reserve.
    #[strum(serialize = "MP")]
    Mp,
    /// Accumulating tension.
    #[strum(serialize = "TP")]
    Tp,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; ResourceKind::COUNT] =
        [ResourceKind::Hp, ResourceKind::Mp, ResourceKind::Tp];

    pub const fn index(self) -> usize {
        match self {
            ResourceKind::Hp => 0,
            ResourceKind::Mp => 1,
            ResourceKind::Tp => 2,
        }
    }

    /// Note tag whose numeric value is this resource's slip rate (% of maximum
    /// per reference cycle).
    pub const fn slip_tag(self) -> &'static str {
        match self {
            ResourceKind::Hp => "slip_HP",
            ResourceKind::Mp => "slip_MP",
            ResourceKind::Tp => "slip_TP",
        }
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// A single resource pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// Outcome of a bounded resource mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceChange {
    pub kind: ResourceKind,
    /// Delta the caller asked for.
    pub requested: i64,
    pub before: u32,
    pub after: u32,
}

impl ResourceChange {
    /// Delta that actually landed after clamping.
    pub const fn applied(&self) -> i64 {
        self.after as i64 - self.before as i64
    }
}

/// HP/MP/TP meters of one battler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeters {
    meters: [ResourceMeter; ResourceKind::COUNT],
}

impl ResourceMeters {
    /// Tension maximum when none is given.
    pub const DEFAULT_TP_MAX: u32 = 100;

    pub const fn new(hp: ResourceMeter, mp: ResourceMeter, tp: ResourceMeter) -> Self {
        Self {
            meters: [hp, mp, tp],
        }
    }

    /// Full HP and MP, empty TP with the default maximum.
    pub const fn at_max(hp_max: u32, mp_max: u32) -> Self {
        Self::new(
            ResourceMeter::full(hp_max),
            ResourceMeter::full(mp_max),
            ResourceMeter::new(0, Self::DEFAULT_TP_MAX),
        )
    }

    pub const fn get(&self, kind: ResourceKind) -> ResourceMeter {
        self.meters[kind.index()]
    }

    pub const fn current(&self, kind: ResourceKind) -> u32 {
        self.meters[kind.index()].current
    }

    pub const fn maximum(&self, kind: ResourceKind) -> u32 {
        self.meters[kind.index()].maximum
    }

    /// Overwrites the current value (clamped to the maximum).
    pub fn set_current(&mut self, kind: ResourceKind, value: u32) {
        let meter = &mut self.meters[kind.index()];
        meter.current = value.min(meter.maximum);
    }

    /// Changes the maximum and pulls the current value down if needed.
    pub fn set_maximum(&mut self, kind: ResourceKind, maximum: u32) {
        let meter = &mut self.meters[kind.index()];
        meter.maximum = maximum;
        meter.current = meter.current.min(maximum);
    }

    /// Applies a signed delta clamped to `[0, maximum]`.
    pub fn gain(&mut self, kind: ResourceKind, delta: i64) -> ResourceChange {
        let meter = &mut self.meters[kind.index()];
        let before = meter.current;
        let target = (before as i64).saturating_add(delta);
        meter.current = target.clamp(0, meter.maximum as i64) as u32;

        ResourceChange {
            kind,
            requested: delta,
            before,
            after: meter.current,
        }
    }
}

impl Default for ResourceMeters {
    fn default() -> Self {
        Self::at_max(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn gain_clamps_to_bounds() {
        let mut meters = ResourceMeters::at_max(100, 50);
        meters.set_current(ResourceKind::Hp, 90);

        let heal = meters.gain(ResourceKind::Hp, 25);
        assert_eq!(heal.after, 100);
        assert_eq!(heal.applied(), 10);

        let drain = meters.gain(ResourceKind::Mp, -80);
        assert_eq!(drain.after, 0);
        assert_eq!(drain.applied(), -50);
    }

    #[test]
    fn new_meter_clamps_current() {
        let meter = ResourceMeter::new(500, 200);
        assert_eq!(meter.current(), 200);
    }

    #[test]
    fn kinds_iterate_in_index_order() {
        let order: Vec<usize> = ResourceKind::iter().map(ResourceKind::index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(ResourceKind::Tp.label(), "TP");
        assert_eq!(ResourceKind::Mp.slip_tag(), "slip_MP");
    }
}
