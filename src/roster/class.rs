//! Roles, classes and Raid-Helper spec tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raid role as used by the sheet's roster columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tanks,
    Melee,
    Healers,
    Ranged,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tanks => "tanks",
            Role::Melee => "melee",
            Role::Healers => "healers",
            Role::Ranged => "ranged",
        }
    }

    pub fn is_dps(&self) -> bool {
        matches!(self, Role::Melee | Role::Ranged)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tanks" | "tank" => Ok(Role::Tanks),
            "melee" => Ok(Role::Melee),
            "healers" | "healer" => Ok(Role::Healers),
            "ranged" => Ok(Role::Ranged),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WowClass {
    Mage,
    Hunter,
    DeathKnight,
    Druid,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
}

impl WowClass {
    /// Human-readable name, e.g. "Death Knight"
    pub fn display_name(&self) -> &'static str {
        match self {
            WowClass::Mage => "Mage",
            WowClass::Hunter => "Hunter",
            WowClass::DeathKnight => "Death Knight",
            WowClass::Druid => "Druid",
            WowClass::Paladin => "Paladin",
            WowClass::Priest => "Priest",
            WowClass::Rogue => "Rogue",
            WowClass::Shaman => "Shaman",
            WowClass::Warlock => "Warlock",
            WowClass::Warrior => "Warrior",
        }
    }
}

impl fmt::Display for WowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WowClass {
    type Err = String;

    /// Accepts `death_knight`, `Death Knight`, `DeathKnight`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "mage" => Ok(WowClass::Mage),
            "hunter" => Ok(WowClass::Hunter),
            "deathknight" | "dk" => Ok(WowClass::DeathKnight),
            "druid" => Ok(WowClass::Druid),
            "paladin" => Ok(WowClass::Paladin),
            "priest" => Ok(WowClass::Priest),
            "rogue" => Ok(WowClass::Rogue),
            "shaman" => Ok(WowClass::Shaman),
            "warlock" => Ok(WowClass::Warlock),
            "warrior" => Ok(WowClass::Warrior),
            _ => Err(format!("unknown class '{s}'")),
        }
    }
}

/// Role, class and display spec resolved from a Raid-Helper spec token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecInfo {
    pub role: Role,
    pub class: WowClass,
    pub spec: &'static str,
}

impl SpecInfo {
    const fn new(role: Role, class: WowClass, spec: &'static str) -> Self {
        Self { role, class, spec }
    }

    /// Resolve a Raid-Helper spec token such as `Blood_Tank` or `Protection1`
    pub fn from_raid_helper(token: &str) -> Option<Self> {
        use Role::*;
        use WowClass::*;

        let info = match token.trim() {
            "Protection" => SpecInfo::new(Tanks, Warrior, "Protection"),
            "Protection1" => SpecInfo::new(Tanks, Paladin, "Protection"),
            "Guardian" => SpecInfo::new(Tanks, Druid, "Guardian"),
            "Blood_Tank" => SpecInfo::new(Tanks, DeathKnight, "Blood"),
            "Frost_Tank" => SpecInfo::new(Tanks, DeathKnight, "Frost"),
            "Unholy_Tank" => SpecInfo::new(Tanks, DeathKnight, "Unholy"),
            "Blood_DPS" => SpecInfo::new(Melee, DeathKnight, "Blood"),
            "Frost_DPS" => SpecInfo::new(Melee, DeathKnight, "Frost"),
            "Unholy_DPS" => SpecInfo::new(Melee, DeathKnight, "Unholy"),
            "Arms" => SpecInfo::new(Melee, Warrior, "Arms"),
            "Fury" => SpecInfo::new(Melee, Warrior, "Fury"),
            "Balance" => SpecInfo::new(Ranged, Druid, "Balance"),
            "Feral" => SpecInfo::new(Melee, Druid, "Feral"),
            "Restoration" => SpecInfo::new(Healers, Druid, "Restoration"),
            "Restoration1" => SpecInfo::new(Healers, Shaman, "Restoration"),
            "Holy1" => SpecInfo::new(Healers, Paladin, "Holy"),
            "Retribution" => SpecInfo::new(Melee, Paladin, "Retribution"),
            "Assassination" => SpecInfo::new(Melee, Rogue, "Assassination"),
            "Combat" => SpecInfo::new(Melee, Rogue, "Combat"),
            "Subtlety" => SpecInfo::new(Melee, Rogue, "Subtlety"),
            "Beastmastery" => SpecInfo::new(Ranged, Hunter, "Beast Mastery"),
            "Marksmanship" => SpecInfo::new(Ranged, Hunter, "Marksmanship"),
            "Survival" => SpecInfo::new(Ranged, Hunter, "Survival"),
            "Frost" => SpecInfo::new(Ranged, Mage, "Frost"),
            "Fire" => SpecInfo::new(Ranged, Mage, "Fire"),
            "Arcane" => SpecInfo::new(Ranged, Mage, "Arcane"),
            "Affliction" => SpecInfo::new(Ranged, Warlock, "Affliction"),
            "Demonology" => SpecInfo::new(Ranged, Warlock, "Demonology"),
            "Destruction" => SpecInfo::new(Ranged, Warlock, "Destruction"),
            "Discipline" => SpecInfo::new(Healers, Priest, "Discipline"),
            "Holy" => SpecInfo::new(Healers, Priest, "Holy"),
            "Shadow" => SpecInfo::new(Ranged, Priest, "Shadow"),
            "Elemental" => SpecInfo::new(Ranged, Shaman, "Elemental"),
            "Enhancement" => SpecInfo::new(Melee, Shaman, "Enhancement"),
            _ => return None,
        };
        Some(info)
    }
}

const ICON_BASE_URL: &str = "https://wow.zamimg.com/images/wow/icons/large";

/// Icon shown next to a raider in the sheet
pub fn spec_icon_url(class: WowClass, spec: &str) -> String {
    use WowClass::*;

    let icon = match (class, spec) {
        (Warrior, "Arms") => "ability_warrior_savageblow",
        (Warrior, "Fury") => "ability_warrior_innerrage",
        (Warrior, _) => "ability_warrior_defensivestance",
        (Paladin, "Holy") => "spell_holy_holybolt",
        (Paladin, "Retribution") => "spell_holy_auraoflight",
        (Paladin, _) => "ability_paladin_shieldofthetemplar",
        (DeathKnight, "Frost") => "spell_deathknight_frostpresence",
        (DeathKnight, "Unholy") => "spell_deathknight_unholypresence",
        (DeathKnight, _) => "spell_deathknight_bloodpresence",
        (Druid, "Balance") => "spell_nature_starfall",
        (Druid, "Restoration") => "spell_nature_healingtouch",
        (Druid, _) => "ability_racial_bearform",
        (Hunter, "Marksmanship") => "ability_hunter_focusedaim",
        (Hunter, "Survival") => "ability_hunter_camouflage",
        (Hunter, _) => "ability_hunter_bestialdiscipline",
        (Mage, "Arcane") => "spell_holy_magicalsentry",
        (Mage, "Fire") => "spell_fire_firebolt02",
        (Mage, _) => "spell_frost_frostbolt02",
        (Priest, "Discipline") => "spell_holy_powerwordshield",
        (Priest, "Shadow") => "spell_shadow_shadowwordpain",
        (Priest, _) => "spell_holy_guardianspirit",
        (Rogue, "Combat") => "ability_backstab",
        (Rogue, "Subtlety") => "ability_stealth",
        (Rogue, _) => "ability_rogue_eviscerate",
        (Shaman, "Elemental") => "spell_nature_lightning",
        (Shaman, "Enhancement") => "spell_nature_lightningshield",
        (Shaman, _) => "spell_nature_magicimmunity",
        (Warlock, "Demonology") => "spell_shadow_metamorphosis",
        (Warlock, "Destruction") => "spell_shadow_rainoffire",
        (Warlock, _) => "spell_shadow_deathcoiltotem",
    };
    format!("{ICON_BASE_URL}/{icon}.jpg")
}
