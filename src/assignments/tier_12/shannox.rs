//! Shannox tank, healer and Flare cooldown assignments
//!
//! Nothing is read back from the sheet. Every run picks the Shannox and
//! Riplimb tanks and healers, a Rageface healer and up to four pairs of raid
//! cooldowns for Flares, then writes each slot as an icon formula next to the
//! raider's name.

use crate::assignments::core::{summary_line, Encounter, RangeWrite, EMPTY_SLOT};
use crate::error::AssignResult;
use crate::roster::{Claims, RaidRoster, Raider, RaiderId};
use crate::sheets::CellGrid;
use tracing::{debug, warn};

/// Shown in place of a class icon when a slot has nobody
pub const PLACEHOLDER_ICON: &str =
    "https://cdn.discordapp.com/emojis/1161060152842125372.webp?size=240&quality=lossless";

const FLARE_ROWS: [u32; 4] = [16, 17, 18, 19];

fn image(url: &str) -> String {
    format!("=image(\"{url}\")")
}

/// `C:G` layout: icon, then name
fn left_cells(raider: Option<&Raider>) -> Vec<String> {
    match raider {
        Some(r) => vec![image(&r.spec_link()), r.name.clone()],
        None => vec![image(PLACEHOLDER_ICON), EMPTY_SLOT.to_string()],
    }
}

/// `I:M` layout: name, three spacer cells, then icon
fn right_cells(raider: Option<&Raider>) -> Vec<String> {
    let (name, icon) = match raider {
        Some(r) => (r.name.clone(), image(&r.spec_link())),
        None => (EMPTY_SLOT.to_string(), image(PLACEHOLDER_ICON)),
    };
    vec![name, String::new(), String::new(), String::new(), icon]
}

pub struct Shannox {
    claims: Claims,
    shannox_tank: Option<RaiderId>,
    shannox_healer: Option<RaiderId>,
    riplimb_tank: Option<RaiderId>,
    riplimb_healer: Option<RaiderId>,
    rageface_healer: Option<RaiderId>,
    flare_cooldowns: Vec<Vec<RaiderId>>,
}

impl Shannox {
    pub fn new(roster: RaidRoster) -> Self {
        Self {
            claims: Claims::new(roster),
            shannox_tank: None,
            shannox_healer: None,
            riplimb_tank: None,
            riplimb_healer: None,
            rageface_healer: None,
            flare_cooldowns: Vec::new(),
        }
    }

    pub fn roster(&self) -> &RaidRoster {
        self.claims.roster()
    }

    pub fn shannox_tank(&self) -> Option<RaiderId> {
        self.shannox_tank
    }

    pub fn shannox_healer(&self) -> Option<RaiderId> {
        self.shannox_healer
    }

    pub fn riplimb_tank(&self) -> Option<RaiderId> {
        self.riplimb_tank
    }

    pub fn riplimb_healer(&self) -> Option<RaiderId> {
        self.riplimb_healer
    }

    pub fn rageface_healer(&self) -> Option<RaiderId> {
        self.rageface_healer
    }

    pub fn flare_cooldowns(&self) -> &[Vec<RaiderId>] {
        &self.flare_cooldowns
    }

    /// Claim the picked raider, or log and leave the slot open
    fn fill(&mut self, slot: &str, picked: AssignResult<RaiderId>) -> Option<RaiderId> {
        match picked {
            Ok(id) => {
                self.claims.claim(id);
                debug!(raider = self.claims.roster().name(id), slot, "Placed");
                Some(id)
            }
            Err(e) => {
                warn!(slot, error = %e, "Leaving slot empty");
                None
            }
        }
    }

    fn raider(&self, id: Option<RaiderId>) -> Option<&Raider> {
        id.map(|id| self.claims.raider(id))
    }

    fn flare_group(&self, index: usize) -> &[RaiderId] {
        self.flare_cooldowns
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Encounter for Shannox {
    fn name(&self) -> &'static str {
        "Shannox"
    }

    fn read_range(&self) -> Option<&'static str> {
        None
    }

    fn load(&mut self, _grid: &CellGrid) {}

    fn reset(&mut self) {
        self.shannox_tank = None;
        self.shannox_healer = None;
        self.riplimb_tank = None;
        self.riplimb_healer = None;
        self.rageface_healer = None;
        self.flare_cooldowns.clear();
        self.claims.release_all();
    }

    fn optimize(&mut self) -> AssignResult<()> {
        if self.shannox_tank.is_none() {
            let main_tank = self.claims.roster().main_tank()?;
            self.shannox_tank = self.fill("shannox tank", Ok(main_tank));
        }
        if self.shannox_healer.is_none() {
            let picked = self.claims.tank_healer();
            self.shannox_healer = self.fill("shannox healer", picked);
        }
        if self.riplimb_tank.is_none() {
            let picked = self.claims.next_tank();
            self.riplimb_tank = self.fill("riplimb tank", picked);
        }
        if self.riplimb_healer.is_none() {
            let picked = self.claims.tank_healer();
            self.riplimb_healer = self.fill("riplimb healer", picked);
        }
        if self.rageface_healer.is_none() {
            let picked = self.claims.healer(&["discipline priest"]);
            self.rageface_healer = self.fill("rageface healer", picked);
        }
        if self.flare_cooldowns.is_empty() {
            self.flare_cooldowns = self
                .claims
                .roster()
                .raid_cooldowns(false)
                .into_iter()
                .take(FLARE_ROWS.len())
                .collect();
        }
        Ok(())
    }

    fn writes(&self) -> Vec<RangeWrite> {
        let mut writes = vec![
            RangeWrite::new("Shannox!C7:G7", vec![left_cells(self.raider(self.shannox_tank))]),
            RangeWrite::new("Shannox!I7:M7", vec![right_cells(self.raider(self.shannox_healer))]),
            RangeWrite::new("Shannox!C8:G8", vec![left_cells(self.raider(self.riplimb_tank))]),
            RangeWrite::new("Shannox!I8:M8", vec![right_cells(self.raider(self.riplimb_healer))]),
            RangeWrite::new("Shannox!I10:M10", vec![right_cells(self.raider(self.rageface_healer))]),
        ];

        for (index, row) in FLARE_ROWS.iter().enumerate() {
            let group = self.flare_group(index);
            let first = group.first().map(|id| self.claims.raider(*id));
            let second = group.get(1).map(|id| self.claims.raider(*id)).or(first);
            writes.push(RangeWrite::new(
                format!("Shannox!C{row}:G{row}"),
                vec![left_cells(first)],
            ));
            writes.push(RangeWrite::new(
                format!("Shannox!I{row}:M{row}"),
                vec![right_cells(second)],
            ));
        }
        writes
    }

    fn summary(&self) -> Vec<String> {
        let roster = self.claims.roster();
        let name = |id: Option<RaiderId>| id.map_or(EMPTY_SLOT, |id| roster.name(id));
        let mut lines = vec![
            format!("shannox tank: {}", name(self.shannox_tank)),
            format!("shannox healer: {}", name(self.shannox_healer)),
            format!("riplimb tank: {}", name(self.riplimb_tank)),
            format!("riplimb healer: {}", name(self.riplimb_healer)),
            format!("rageface healer: {}", name(self.rageface_healer)),
        ];
        for index in 0..FLARE_ROWS.len() {
            let names: Vec<&str> = self.flare_group(index).iter().map(|id| roster.name(*id)).collect();
            lines.push(summary_line(&format!("flare {}", index + 1), &names));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;
    use crate::roster::SpecInfo;

    fn roster(entries: &[(&str, &str)]) -> RaidRoster {
        RaidRoster::from_raiders(entries.iter().map(|(name, token)| {
            Raider::new(*name, SpecInfo::from_raid_helper(token).unwrap())
        }))
    }

    fn full_roster() -> RaidRoster {
        roster(&[
            ("Bones", "Blood_Tank"),
            ("Shield", "Protection1"),
            ("Light", "Holy1"),
            ("Tree", "Restoration"),
            ("Barrier", "Discipline"),
            ("Totem", "Restoration1"),
            ("Rally", "Fury"),
            ("Rogue", "Combat"),
        ])
    }

    #[test]
    fn test_slot_picks() {
        let mut fight = Shannox::new(full_roster());
        fight.optimize().unwrap();
        let roster = fight.roster();
        let name = |id: Option<RaiderId>| id.map(|id| roster.name(id));

        assert_eq!(name(fight.shannox_tank()), Some("Bones"));
        assert_eq!(name(fight.shannox_healer()), Some("Light"));
        assert_eq!(name(fight.riplimb_tank()), Some("Shield"));
        assert_eq!(name(fight.riplimb_healer()), Some("Tree"));
        assert_eq!(name(fight.rageface_healer()), Some("Barrier"));
    }

    #[test]
    fn test_flare_cooldowns_reuse_claimed_healers() {
        let mut fight = Shannox::new(full_roster());
        fight.optimize().unwrap();
        let roster = fight.roster();
        let groups: Vec<Vec<&str>> = fight
            .flare_cooldowns()
            .iter()
            .map(|g| g.iter().map(|id| roster.name(*id)).collect())
            .collect();

        assert_eq!(groups, vec![vec!["Barrier", "Totem"], vec!["Light", "Tree"], vec!["Rally"]]);
    }

    #[test]
    fn test_writes_layout() {
        let mut fight = Shannox::new(full_roster());
        fight.optimize().unwrap();
        let writes = fight.writes();

        assert_eq!(writes.len(), 13);
        assert_eq!(writes[0].range, "Shannox!C7:G7");
        assert_eq!(writes[0].rows[0][1], "Bones");
        assert!(writes[0].rows[0][0].starts_with("=image(\"https://wow.zamimg.com/"));

        assert_eq!(writes[1].range, "Shannox!I7:M7");
        assert_eq!(writes[1].rows[0].len(), 5);
        assert_eq!(writes[1].rows[0][0], "Light");

        let third_flare_right = &writes[10];
        assert_eq!(third_flare_right.range, "Shannox!I18:M18");
        assert_eq!(third_flare_right.rows[0][0], "Rally");

        let fourth_flare_left = &writes[11];
        assert_eq!(fourth_flare_left.range, "Shannox!C19:G19");
        assert_eq!(
            fourth_flare_left.rows[0],
            vec![image(PLACEHOLDER_ICON), EMPTY_SLOT.to_string()]
        );
    }

    #[test]
    fn test_missing_off_tank_leaves_slot_empty() {
        let mut fight = Shannox::new(roster(&[("Bones", "Blood_Tank"), ("Light", "Holy1")]));
        fight.optimize().unwrap();

        assert!(fight.riplimb_tank().is_none());
        assert!(fight.riplimb_healer().is_none());
        let writes = fight.writes();
        assert_eq!(writes[2].rows[0][1], "Empty");
    }

    #[test]
    fn test_missing_main_tank_is_error() {
        let mut fight = Shannox::new(roster(&[("Light", "Holy1")]));
        assert!(matches!(
            fight.optimize(),
            Err(AssignError::RaiderUnavailable { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let mut fight = Shannox::new(full_roster());
        fight.optimize().unwrap();
        let summary = fight.summary();
        assert_eq!(summary[0], "shannox tank: Bones");
        assert_eq!(summary[5], "flare 1: Barrier, Totem");
        assert_eq!(summary[8], "flare 4: Empty");
    }
}
