//! Raid roster model
//!
//! A `RaidRoster` is the list of signed-up raiders for one raid. Encounters
//! never mutate it; which raiders already hold a position is tracked
//! separately by [`Claims`].

pub mod class;
pub mod claims;

pub use claims::{Claims, SOAKER_PREFERENCE, TANK_HEALER_PREFERENCE};
pub use class::{spec_icon_url, Role, SpecInfo, WowClass};

use crate::error::{AssignError, AssignResult};
use crate::sheets::CellGrid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Main tank preference, most preferred first
const MAIN_TANK_CLASSES: [WowClass; 4] = [
    WowClass::DeathKnight,
    WowClass::Paladin,
    WowClass::Warrior,
    WowClass::Druid,
];

/// Index of a raider within its roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaiderId(pub usize);

impl fmt::Display for RaiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raider {
    pub party: u32,
    pub slot: u32,
    pub name: String,
    pub discord_id: String,
    pub wow_class: WowClass,
    pub spec: String,
    pub role: Role,
    pub color: String,
    /// Rank among elemental shamans who can be pulled into healing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_healer: Option<u32>,
}

impl Raider {
    pub fn new(name: impl Into<String>, info: SpecInfo) -> Self {
        Self {
            party: 0,
            slot: 0,
            name: name.into(),
            discord_id: String::new(),
            wow_class: info.class,
            spec: info.spec.to_string(),
            role: info.role,
            color: String::new(),
            flex_healer: None,
        }
    }

    /// Healer, or a flex healer whose rank is below `flex`
    pub fn is_healer(&self, flex: u32) -> bool {
        self.role == Role::Healers || self.flex_healer.is_some_and(|rank| rank < flex)
    }

    pub fn is_flexed(&self, flex: u32) -> bool {
        self.role != Role::Healers && self.is_healer(flex)
    }

    pub fn is_spec(&self, spec: &str) -> bool {
        self.spec.eq_ignore_ascii_case(spec)
    }

    /// Match a preference such as "restoration shaman", "holy_paladin" or "warrior"
    pub fn matches(&self, preference: &str) -> bool {
        let wanted = normalize_preference(preference);
        let class = self.wow_class.display_name().to_lowercase();
        let full = format!("{} {}", self.spec.to_lowercase(), class);
        wanted == full || wanted == class
    }

    pub fn spec_link(&self) -> String {
        spec_icon_url(self.wow_class, &self.spec)
    }

    /// Raid-wide cooldown this raider brings, if any
    pub fn raid_cooldown(&self) -> Option<RaidCooldown> {
        match (self.wow_class, self.spec.as_str()) {
            (WowClass::Priest, "Discipline") => Some(RaidCooldown::PowerWordBarrier),
            (WowClass::Shaman, "Restoration") => Some(RaidCooldown::SpiritLinkTotem),
            (WowClass::Paladin, "Holy") => Some(RaidCooldown::AuraMastery),
            (WowClass::Druid, "Restoration") => Some(RaidCooldown::Tranquility),
            (WowClass::Priest, "Holy") => Some(RaidCooldown::DivineHymn),
            (WowClass::Warrior, _) => Some(RaidCooldown::RallyingCry),
            (WowClass::DeathKnight, "Unholy") => Some(RaidCooldown::AntiMagicZone),
            _ => None,
        }
    }
}

fn normalize_preference(preference: &str) -> String {
    preference
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Raid-wide damage reduction cooldowns, in assignment priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RaidCooldown {
    PowerWordBarrier,
    SpiritLinkTotem,
    AuraMastery,
    Tranquility,
    DivineHymn,
    RallyingCry,
    AntiMagicZone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaidRoster {
    raiders: Vec<Raider>,
}

impl RaidRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, ranking elemental shamans as flex healers in roster order
    pub fn from_raiders(raiders: impl IntoIterator<Item = Raider>) -> Self {
        let mut roster = Self::new();
        for raider in raiders {
            roster.add_raider(raider);
        }
        roster
    }

    /// Build a roster from the sheet's roster export
    ///
    /// Columns: party, slot, name, discord id, class, spec, role, color.
    /// Rows without a name are skipped; rows with an unknown class or role
    /// are logged and skipped.
    pub fn from_sheet_rows(grid: &CellGrid) -> Self {
        let mut roster = Self::new();
        for row in 0..grid.height() {
            let name = grid.get(row, 2);
            if name.is_empty() {
                continue;
            }

            let wow_class = match grid.get(row, 4).parse::<WowClass>() {
                Ok(class) => class,
                Err(e) => {
                    warn!(raider = name, error = %e, "Skipping roster row");
                    continue;
                }
            };
            let role = match grid.get(row, 6).parse::<Role>() {
                Ok(role) => role,
                Err(e) => {
                    warn!(raider = name, error = %e, "Skipping roster row");
                    continue;
                }
            };

            roster.add_raider(Raider {
                party: grid.get(row, 0).parse().unwrap_or(0),
                slot: grid.get(row, 1).parse().unwrap_or(0),
                name: name.to_string(),
                discord_id: grid.get(row, 3).to_string(),
                wow_class,
                spec: grid.get(row, 5).to_string(),
                role,
                color: grid.get(row, 7).to_string(),
                flex_healer: None,
            });
        }
        roster
    }

    pub fn add_raider(&mut self, mut raider: Raider) -> RaiderId {
        if raider.flex_healer.is_none()
            && raider.wow_class == WowClass::Shaman
            && raider.is_spec("Elemental")
        {
            raider.flex_healer = Some(self.elemental_shamans().len() as u32);
        }
        self.raiders.push(raider);
        RaiderId(self.raiders.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.raiders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raiders.is_empty()
    }

    /// Raider by id; ids are only minted by this roster
    pub fn get(&self, id: RaiderId) -> &Raider {
        &self.raiders[id.0]
    }

    pub fn name(&self, id: RaiderId) -> &str {
        &self.get(id).name
    }

    pub fn iter(&self) -> impl Iterator<Item = (RaiderId, &Raider)> {
        self.raiders
            .iter()
            .enumerate()
            .map(|(i, raider)| (RaiderId(i), raider))
    }

    pub fn ids(&self) -> Vec<RaiderId> {
        (0..self.raiders.len()).map(RaiderId).collect()
    }

    pub fn raiders(&self) -> &[Raider] {
        &self.raiders
    }

    /// Look up a raider by sheet name (case-insensitive)
    pub fn get_raider_by_name(&self, name: &str) -> Option<RaiderId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.iter()
            .find(|(_, r)| r.name == name)
            .or_else(|| {
                let lowered = name.to_lowercase();
                self.iter().find(|(_, r)| r.name.to_lowercase() == lowered)
            })
            .map(|(id, _)| id)
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<RaiderId>
    where
        F: Fn(&Raider) -> bool,
    {
        self.iter()
            .filter(|(_, r)| predicate(r))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn tanks(&self) -> Vec<RaiderId> {
        self.filter(|r| r.role == Role::Tanks)
    }

    /// Healers, including the first `flex` elemental shamans
    pub fn healers(&self, flex: u32) -> Vec<RaiderId> {
        self.filter(|r| r.is_healer(flex))
    }

    pub fn melee(&self) -> Vec<RaiderId> {
        self.filter(|r| r.role == Role::Melee)
    }

    pub fn ranged(&self) -> Vec<RaiderId> {
        self.filter(|r| r.role == Role::Ranged)
    }

    pub fn of_class(&self, class: WowClass) -> Vec<RaiderId> {
        self.filter(|r| r.wow_class == class)
    }

    pub fn enhancement_shamans(&self) -> Vec<RaiderId> {
        self.filter(|r| r.wow_class == WowClass::Shaman && r.is_spec("Enhancement"))
    }

    pub fn elemental_shamans(&self) -> Vec<RaiderId> {
        self.filter(|r| r.wow_class == WowClass::Shaman && r.is_spec("Elemental"))
    }

    pub fn death_knights(&self) -> Vec<RaiderId> {
        self.of_class(WowClass::DeathKnight)
    }

    pub fn rogues(&self) -> Vec<RaiderId> {
        self.of_class(WowClass::Rogue)
    }

    pub fn warlocks(&self) -> Vec<RaiderId> {
        self.of_class(WowClass::Warlock)
    }

    /// First tank by class preference: Death Knight, Paladin, Warrior, Druid
    pub fn main_tank(&self) -> AssignResult<RaiderId> {
        MAIN_TANK_CLASSES
            .iter()
            .find_map(|class| {
                self.iter()
                    .find(|(_, r)| r.role == Role::Tanks && r.wow_class == *class)
                    .map(|(id, _)| id)
            })
            .ok_or_else(|| AssignError::raider_unavailable("Roster has no tanks"))
    }

    /// Group raid cooldown providers for back-to-back use
    ///
    /// Providers are taken in cooldown priority order, then roster order.
    /// Each group holds at most two providers. When `can_stack` is false a
    /// group never holds two of the same cooldown.
    pub fn raid_cooldowns(&self, can_stack: bool) -> Vec<Vec<RaiderId>> {
        let mut providers: Vec<(RaidCooldown, RaiderId)> = self
            .iter()
            .filter_map(|(id, r)| r.raid_cooldown().map(|cd| (cd, id)))
            .collect();
        providers.sort();

        let mut groups: Vec<Vec<(RaidCooldown, RaiderId)>> = Vec::new();
        for (cooldown, id) in providers {
            let open = groups.iter_mut().find(|group| {
                group.len() < 2 && (can_stack || group.iter().all(|(cd, _)| *cd != cooldown))
            });
            match open {
                Some(group) => group.push((cooldown, id)),
                None => groups.push(vec![(cooldown, id)]),
            }
        }

        groups
            .into_iter()
            .map(|group| group.into_iter().map(|(_, id)| id).collect())
            .collect()
    }
}

/// A roster as dumped to disk, with where and when it was fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub roster: RaidRoster,
}

impl RosterSnapshot {
    pub fn new(source: impl Into<String>, roster: RaidRoster) -> Self {
        Self {
            source: source.into(),
            fetched_at: Utc::now(),
            roster,
        }
    }
}

impl<'a> IntoIterator for &'a RaidRoster {
    type Item = &'a Raider;
    type IntoIter = std::slice::Iter<'a, Raider>;

    fn into_iter(self) -> Self::IntoIter {
        self.raiders.iter()
    }
}
