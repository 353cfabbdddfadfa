//! Per-encounter claim tracking
//!
//! Every encounter starts from a fresh `Claims` over its own copy of the
//! roster. A claimed raider already holds a position in that encounter, so
//! the pickers below only ever return unclaimed raiders.

use crate::error::{AssignError, AssignResult};
use crate::roster::{RaidRoster, Raider, RaiderId, Role};
use std::collections::HashSet;

/// Healers preferred on a tank, most preferred first
pub const TANK_HEALER_PREFERENCE: [&str; 5] = [
    "holy paladin",
    "restoration druid",
    "discipline priest",
    "restoration shaman",
    "holy priest",
];

/// Melee that can soak, most preferred first
pub const SOAKER_PREFERENCE: [&str; 5] = [
    "unholy death knight",
    "feral druid",
    "arms warrior",
    "fury warrior",
    "retribution paladin",
];

#[derive(Debug, Clone)]
pub struct Claims {
    roster: RaidRoster,
    claimed: HashSet<RaiderId>,
}

impl Claims {
    pub fn new(roster: RaidRoster) -> Self {
        Self {
            roster,
            claimed: HashSet::new(),
        }
    }

    pub fn roster(&self) -> &RaidRoster {
        &self.roster
    }

    pub fn raider(&self, id: RaiderId) -> &Raider {
        self.roster.get(id)
    }

    pub fn is_claimed(&self, id: RaiderId) -> bool {
        self.claimed.contains(&id)
    }

    /// Mark a raider as positioned; returns false if they already were
    pub fn claim(&mut self, id: RaiderId) -> bool {
        self.claimed.insert(id)
    }

    pub fn release_all(&mut self) {
        self.claimed.clear();
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    /// Keep only unclaimed ids, preserving order
    pub fn free(&self, ids: Vec<RaiderId>) -> Vec<RaiderId> {
        ids.into_iter().filter(|id| !self.is_claimed(*id)).collect()
    }

    pub fn unclaimed(&self) -> Vec<RaiderId> {
        self.free(self.roster.ids())
    }

    /// Unclaimed tank other than the main tank
    pub fn next_tank(&self) -> AssignResult<RaiderId> {
        let main_tank = self.roster.main_tank().ok();
        self.free(self.roster.tanks())
            .into_iter()
            .find(|id| Some(*id) != main_tank)
            .ok_or_else(|| AssignError::raider_unavailable("off tank"))
    }

    /// Unclaimed healer, trying `preferred` in order before any healer
    pub fn healer(&self, preferred: &[&str]) -> AssignResult<RaiderId> {
        let healers = self.free(self.roster.healers(0));
        preferred
            .iter()
            .find_map(|pref| {
                healers
                    .iter()
                    .copied()
                    .find(|id| self.raider(*id).matches(pref))
            })
            .or_else(|| healers.first().copied())
            .ok_or_else(|| AssignError::raider_unavailable("healer"))
    }

    pub fn tank_healer(&self) -> AssignResult<RaiderId> {
        self.healer(&TANK_HEALER_PREFERENCE)
    }

    /// Every unclaimed raider matching `preferred`, grouped by preference order
    pub fn raiders(&self, preferred: &[&str]) -> Vec<RaiderId> {
        let free = self.unclaimed();
        let mut picked = Vec::new();
        for pref in preferred {
            for id in &free {
                if !picked.contains(id) && self.raider(*id).matches(pref) {
                    picked.push(*id);
                }
            }
        }
        picked
    }

    /// First unclaimed raider matching `preferred`
    ///
    /// Without `strict`, falls back to the first unclaimed raider of any kind.
    pub fn pick(&self, preferred: &[&str], strict: bool) -> AssignResult<RaiderId> {
        self.raiders(preferred)
            .first()
            .copied()
            .or_else(|| {
                if strict {
                    None
                } else {
                    self.unclaimed().first().copied()
                }
            })
            .ok_or_else(|| AssignError::raider_unavailable(preferred.join(" or ")))
    }

    /// Unclaimed DPS matching `preferred`, or the first unclaimed ranged DPS
    pub fn dps(&self, preferred: &[&str]) -> Vec<RaiderId> {
        let matched: Vec<RaiderId> = self
            .raiders(preferred)
            .into_iter()
            .filter(|id| self.raider(*id).role.is_dps())
            .collect();
        if !matched.is_empty() {
            return matched;
        }
        self.free(self.roster.filter(|r| r.role == Role::Ranged))
            .into_iter()
            .take(1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::SpecInfo;

    fn roster(entries: &[(&str, &str)]) -> RaidRoster {
        RaidRoster::from_raiders(entries.iter().map(|(name, token)| {
            Raider::new(*name, SpecInfo::from_raid_helper(token).unwrap())
        }))
    }

    #[test]
    fn test_next_tank_skips_main_tank() {
        let claims = Claims::new(roster(&[("Bones", "Blood_Tank"), ("Shield", "Protection")]));
        assert_eq!(claims.roster().name(claims.next_tank().unwrap()), "Shield");
    }

    #[test]
    fn test_next_tank_unavailable() {
        let mut claims = Claims::new(roster(&[("Bones", "Blood_Tank"), ("Shield", "Protection")]));
        claims.claim(RaiderId(1));
        assert!(matches!(
            claims.next_tank(),
            Err(AssignError::RaiderUnavailable { .. })
        ));
    }

    #[test]
    fn test_healer_preference_then_fallback() {
        let mut claims = Claims::new(roster(&[
            ("Tree", "Restoration"),
            ("Light", "Holy1"),
            ("Shield", "Discipline"),
        ]));

        assert_eq!(claims.healer(&["holy_paladin"]).unwrap(), RaiderId(1));
        claims.claim(RaiderId(1));
        assert_eq!(claims.healer(&["holy_paladin"]).unwrap(), RaiderId(0));
    }

    #[test]
    fn test_tank_healer_order() {
        let claims = Claims::new(roster(&[("Shield", "Discipline"), ("Tree", "Restoration")]));
        assert_eq!(claims.tank_healer().unwrap(), RaiderId(1));
    }

    #[test]
    fn test_healer_missing() {
        let claims = Claims::new(roster(&[("Rogue", "Combat")]));
        assert!(claims.healer(&[]).is_err());
    }

    #[test]
    fn test_pick_strict_and_lenient() {
        let claims = Claims::new(roster(&[("Rogue", "Combat"), ("Cat", "Feral")]));
        assert_eq!(claims.pick(&SOAKER_PREFERENCE, true).unwrap(), RaiderId(1));
        assert!(claims.pick(&["unholy death knight"], true).is_err());
        assert_eq!(claims.pick(&["unholy death knight"], false).unwrap(), RaiderId(0));
    }

    #[test]
    fn test_raiders_follow_preference_order() {
        let claims = Claims::new(roster(&[
            ("Ret", "Retribution"),
            ("Cat", "Feral"),
            ("Plague", "Unholy_DPS"),
        ]));
        assert_eq!(
            claims.raiders(&SOAKER_PREFERENCE),
            vec![RaiderId(2), RaiderId(1), RaiderId(0)]
        );
    }

    #[test]
    fn test_dps_falls_back_to_ranged() {
        let claims = Claims::new(roster(&[("Rogue", "Combat"), ("Hunter", "Survival"), ("Lock", "Affliction")]));
        assert_eq!(claims.dps(&["shadow priest", "balance druid"]), vec![RaiderId(1)]);
    }

    #[test]
    fn test_dps_returns_all_preferred() {
        let claims = Claims::new(roster(&[
            ("Moon", "Balance"),
            ("Void", "Shadow"),
            ("Hunter", "Survival"),
        ]));
        assert_eq!(
            claims.dps(&["shadow priest", "balance druid"]),
            vec![RaiderId(1), RaiderId(0)]
        );
    }

    #[test]
    fn test_claim_and_release() {
        let mut claims = Claims::new(roster(&[("Rogue", "Combat")]));
        assert!(claims.claim(RaiderId(0)));
        assert!(!claims.claim(RaiderId(0)));
        assert_eq!(claims.claimed_count(), 1);
        claims.release_all();
        assert!(!claims.is_claimed(RaiderId(0)));
    }
}
