//! Shared pieces for encounter assignment
//!
//! An [`Encounter`] adopts whatever is already written in its sheet range,
//! fills the remaining positions from unclaimed raiders, and renders its
//! positions back into one or more ranges.

use crate::error::AssignResult;
use crate::roster::{RaidRoster, RaiderId, WowClass, SOAKER_PREFERENCE};
use crate::sheets::CellGrid;
use std::cmp::Ordering;

/// Cell text for a position nobody holds
pub const EMPTY_SLOT: &str = "Empty";

/// An ordered group of raiders sharing one position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    members: Vec<RaiderId>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, id: RaiderId) {
        self.members.push(id);
    }

    pub fn contains(&self, id: RaiderId) -> bool {
        self.members.contains(&id)
    }

    pub fn members(&self) -> &[RaiderId] {
        &self.members
    }

    pub fn first(&self) -> Option<RaiderId> {
        self.members.first().copied()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Healers in the group; the first `flex` elemental shamans count as healers
    pub fn healer_count(&self, roster: &RaidRoster, flex: u32) -> usize {
        self.members
            .iter()
            .filter(|id| roster.get(**id).is_healer(flex))
            .count()
    }

    pub fn has_healer(&self, roster: &RaidRoster, flex: u32) -> bool {
        self.healer_count(roster, flex) > 0
    }

    /// Whether the group holds a `class`, optionally restricted to one spec
    pub fn has_class(&self, roster: &RaidRoster, class: WowClass, spec: Option<&str>) -> bool {
        self.members.iter().any(|id| {
            let raider = roster.get(*id);
            raider.wow_class == class && spec.map_or(true, |s| raider.is_spec(s))
        })
    }

    /// Members able to soak
    pub fn soaker_count(&self, roster: &RaidRoster) -> usize {
        self.members
            .iter()
            .filter(|id| is_soaker(roster, **id))
            .count()
    }

    pub fn names<'r>(&self, roster: &'r RaidRoster) -> Vec<&'r str> {
        self.members.iter().map(|id| roster.name(*id)).collect()
    }
}

/// Any death knight, feral druid, warrior or retribution paladin
pub fn is_soaker(roster: &RaidRoster, id: RaiderId) -> bool {
    let raider = roster.get(id);
    raider.wow_class == WowClass::DeathKnight
        || raider.wow_class == WowClass::Warrior
        || SOAKER_PREFERENCE.iter().any(|pref| raider.matches(pref))
}

impl PartialEq<usize> for Assignment {
    fn eq(&self, other: &usize) -> bool {
        self.len() == *other
    }
}

impl PartialOrd<usize> for Assignment {
    fn partial_cmp(&self, other: &usize) -> Option<Ordering> {
        self.len().partial_cmp(other)
    }
}

/// Values destined for one sheet range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWrite {
    pub range: String,
    pub rows: Vec<Vec<String>>,
}

impl RangeWrite {
    pub fn new(range: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            range: range.into(),
            rows,
        }
    }

    pub fn from_grid(range: impl Into<String>, grid: CellGrid) -> Self {
        Self::new(range, grid.into_rows())
    }
}

/// A boss fight with named positions
pub trait Encounter: Send {
    fn name(&self) -> &'static str;

    /// Range holding existing assignments, if the fight reads any back
    fn read_range(&self) -> Option<&'static str>;

    /// Adopt assignments already in the sheet; unknown names are ignored
    ///
    /// The grid is also kept as the base for [`Encounter::writes`], so cells
    /// the fight does not own are written back untouched.
    fn load(&mut self, grid: &CellGrid);

    /// Drop every position and claim
    fn reset(&mut self);

    /// Place every unclaimed raider the fight has a use for
    fn optimize(&mut self) -> AssignResult<()>;

    fn writes(&self) -> Vec<RangeWrite>;

    /// One line per position, for logs and dry runs
    fn summary(&self) -> Vec<String>;
}

/// Render a slot line such as `skull: Thrall, Jaina`
pub(crate) fn summary_line(label: &str, names: &[&str]) -> String {
    if names.is_empty() {
        format!("{label}: {EMPTY_SLOT}")
    } else {
        format!("{label}: {}", names.join(", "))
    }
}
