//! Al'Akir marker groups
//!
//! Eight raid-marker groups on the sheet, four on top (skull, star, diamond,
//! cross) and four below (triangle, square, moon, circle), each six rows deep.
//! Groups aim for three members and take a fourth only once every candidate
//! group has three.

use crate::assignments::core::{summary_line, Assignment, Encounter, RangeWrite};
use crate::error::{AssignError, AssignResult};
use crate::roster::{Claims, RaidRoster, RaiderId};
use crate::sheets::CellGrid;
use tracing::debug;

pub const ALAKIR_RANGE: &str = "TotFW Assigns!Q70:AR84";

const RANGE_HEIGHT: usize = 15;
const RANGE_WIDTH: usize = 28;
const GROUP_ROWS: usize = 6;
const SOFT_CAP: usize = 3;
const HARD_CAP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Skull,
    Cross,
    Square,
    Moon,
    Triangle,
    Star,
    Diamond,
    Circle,
}

impl Marker {
    pub const ALL: [Marker; 8] = [
        Marker::Skull,
        Marker::Cross,
        Marker::Square,
        Marker::Moon,
        Marker::Triangle,
        Marker::Star,
        Marker::Diamond,
        Marker::Circle,
    ];

    const MELEE_ORDER: [Marker; 5] = [
        Marker::Triangle,
        Marker::Diamond,
        Marker::Cross,
        Marker::Star,
        Marker::Square,
    ];

    const RANGED_ORDER: [Marker; 5] = [
        Marker::Skull,
        Marker::Moon,
        Marker::Circle,
        Marker::Square,
        Marker::Star,
    ];

    const HEALER_ORDER: [Marker; 8] = [
        Marker::Skull,
        Marker::Diamond,
        Marker::Moon,
        Marker::Triangle,
        Marker::Star,
        Marker::Square,
        Marker::Circle,
        Marker::Cross,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Marker::Skull => "skull",
            Marker::Cross => "cross",
            Marker::Square => "square",
            Marker::Moon => "moon",
            Marker::Triangle => "triangle",
            Marker::Star => "star",
            Marker::Diamond => "diamond",
            Marker::Circle => "circle",
        }
    }

    /// (first row, column) of the group's name cells within the range
    fn cell(self) -> (usize, usize) {
        match self {
            Marker::Skull => (1, 1),
            Marker::Star => (1, 8),
            Marker::Diamond => (1, 15),
            Marker::Cross => (1, 22),
            Marker::Triangle => (9, 1),
            Marker::Square => (9, 8),
            Marker::Moon => (9, 15),
            Marker::Circle => (9, 22),
        }
    }
}

/// Pick from five groups in priority order
///
/// The first group wins while it is below the soft cap and no larger than the
/// next two; the second while below the soft cap and no larger than the third.
/// The rest go in order to the soft cap, and then all five to the hard cap.
pub fn tiered_pick(sizes: [usize; 5]) -> Option<usize> {
    let [one, two, three, four, five] = sizes;
    if one < SOFT_CAP && one <= two && one <= three {
        return Some(0);
    }
    if two < SOFT_CAP && two <= three {
        return Some(1);
    }
    if three < SOFT_CAP {
        return Some(2);
    }
    if four < SOFT_CAP {
        return Some(3);
    }
    if five < SOFT_CAP {
        return Some(4);
    }
    sizes.iter().position(|size| *size < HARD_CAP)
}

pub struct AlAkir {
    claims: Claims,
    groups: [Assignment; 8],
    flex_healers: u32,
    cells: CellGrid,
}

impl AlAkir {
    pub fn new(roster: RaidRoster, flex_healers: u32) -> Self {
        Self {
            claims: Claims::new(roster),
            groups: Default::default(),
            flex_healers,
            cells: CellGrid::blank(RANGE_HEIGHT, RANGE_WIDTH),
        }
    }

    pub fn group(&self, marker: Marker) -> &Assignment {
        &self.groups[marker.index()]
    }

    pub fn roster(&self) -> &RaidRoster {
        self.claims.roster()
    }

    fn add(&mut self, marker: Marker, id: RaiderId) {
        if self.claims.claim(id) {
            debug!(raider = self.claims.roster().name(id), group = marker.label(), "Placed");
            self.groups[marker.index()].push(id);
        }
    }

    fn pick(&self, order: [Marker; 5]) -> Option<Marker> {
        let sizes = order.map(|m| self.group(m).len());
        tiered_pick(sizes).map(|i| order[i])
    }

    pub fn next_melee_spot(&self) -> AssignResult<Marker> {
        self.pick(Marker::MELEE_ORDER)
            .or_else(|| self.pick(Marker::RANGED_ORDER))
            .ok_or_else(|| AssignError::no_open_slot(self.name()))
    }

    pub fn next_ranged_spot(&self) -> AssignResult<Marker> {
        self.pick(Marker::RANGED_ORDER)
            .or_else(|| self.pick(Marker::MELEE_ORDER))
            .ok_or_else(|| AssignError::no_open_slot(self.name()))
    }

    /// First group under the soft cap without a healer, else the next ranged spot
    pub fn next_healer_spot(&self) -> AssignResult<Marker> {
        let roster = self.claims.roster();
        Marker::HEALER_ORDER
            .into_iter()
            .find(|m| {
                let group = self.group(*m);
                *group < SOFT_CAP && !group.has_healer(roster, self.flex_healers)
            })
            .map_or_else(|| self.next_ranged_spot(), Ok)
    }

    fn place_all<F>(&mut self, ids: Vec<RaiderId>, spot: F) -> AssignResult<()>
    where
        F: Fn(&Self) -> AssignResult<Marker>,
    {
        for id in ids {
            if !self.claims.is_claimed(id) {
                let marker = spot(self)?;
                self.add(marker, id);
            }
        }
        Ok(())
    }

    pub fn fully_optimize(&mut self) -> AssignResult<()> {
        self.reset();
        self.optimize()
    }
}

impl Encounter for AlAkir {
    fn name(&self) -> &'static str {
        "Al'Akir"
    }

    fn read_range(&self) -> Option<&'static str> {
        Some(ALAKIR_RANGE)
    }

    fn load(&mut self, grid: &CellGrid) {
        self.cells = grid.clone();
        for marker in Marker::ALL {
            let (first_row, col) = marker.cell();
            for row in first_row..first_row + GROUP_ROWS {
                if let Some(id) = self.claims.roster().get_raider_by_name(grid.get(row, col)) {
                    self.add(marker, id);
                }
            }
        }
    }

    fn reset(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
        self.claims.release_all();
    }

    fn optimize(&mut self) -> AssignResult<()> {
        let roster = self.claims.roster().clone();
        let flex = self.flex_healers;

        let main_tank = roster.main_tank()?;
        if !self.claims.is_claimed(main_tank) {
            self.add(Marker::Circle, main_tank);
        }

        self.place_all(roster.enhancement_shamans(), Self::next_melee_spot)?;

        let staying_ranged = roster
            .elemental_shamans()
            .into_iter()
            .filter(|id| !roster.get(*id).is_flexed(flex))
            .collect();
        self.place_all(staying_ranged, Self::next_ranged_spot)?;

        self.place_all(roster.healers(flex), Self::next_healer_spot)?;

        for id in roster.death_knights() {
            if self.claims.is_claimed(id) {
                continue;
            }
            let marker = if *self.group(Marker::Cross) < SOFT_CAP {
                Marker::Cross
            } else {
                self.next_melee_spot()?
            };
            self.add(marker, id);
        }

        self.place_all(roster.melee(), Self::next_melee_spot)?;
        self.place_all(roster.tanks(), Self::next_melee_spot)?;
        self.place_all(roster.ranged(), Self::next_ranged_spot)?;
        self.place_all(roster.ids(), Self::next_melee_spot)?;
        Ok(())
    }

    fn writes(&self) -> Vec<RangeWrite> {
        let mut grid = self.cells.clone();
        let roster = self.claims.roster();
        for marker in Marker::ALL {
            let (first_row, col) = marker.cell();
            let names = self.group(marker).names(roster);
            for offset in 0..GROUP_ROWS {
                let name = names.get(offset).copied().unwrap_or_default();
                grid.set(first_row + offset, col, name);
            }
        }
        vec![RangeWrite::from_grid(ALAKIR_RANGE, grid)]
    }

    fn summary(&self) -> Vec<String> {
        let roster = self.claims.roster();
        Marker::ALL
            .into_iter()
            .map(|m| summary_line(m.label(), &self.group(m).names(roster)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Raider, SpecInfo};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn roster(entries: &[(&str, &str)]) -> RaidRoster {
        RaidRoster::from_raiders(entries.iter().map(|(name, token)| {
            Raider::new(*name, SpecInfo::from_raid_helper(token).unwrap())
        }))
    }

    #[test]
    fn test_tiered_pick_prefers_smallest_leader() {
        assert_eq!(tiered_pick([0, 0, 0, 0, 0]), Some(0));
        assert_eq!(tiered_pick([1, 0, 0, 0, 0]), Some(1));
        assert_eq!(tiered_pick([1, 1, 0, 0, 0]), Some(2));
        assert_eq!(tiered_pick([1, 1, 1, 0, 0]), Some(0));
        assert_eq!(tiered_pick([3, 3, 3, 2, 0]), Some(3));
        assert_eq!(tiered_pick([3, 3, 3, 3, 3]), Some(0));
        assert_eq!(tiered_pick([4, 3, 3, 3, 3]), Some(1));
        assert_eq!(tiered_pick([4, 4, 4, 4, 4]), None);
    }

    #[test]
    fn test_main_tank_goes_to_circle() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank"), ("Rogue", "Combat")]), 0);
        fight.optimize().unwrap();
        assert_eq!(fight.group(Marker::Circle).names(fight.roster()), vec!["Bones"]);
        assert_eq!(fight.group(Marker::Triangle).names(fight.roster()), vec!["Rogue"]);
    }

    #[test]
    fn test_healers_spread_one_per_group() {
        let mut fight = AlAkir::new(
            roster(&[
                ("Bones", "Blood_Tank"),
                ("Tree", "Restoration"),
                ("Light", "Holy1"),
                ("Shield", "Discipline"),
            ]),
            0,
        );
        fight.optimize().unwrap();
        assert_eq!(fight.group(Marker::Skull).names(fight.roster()), vec!["Tree"]);
        assert_eq!(fight.group(Marker::Diamond).names(fight.roster()), vec!["Light"]);
        assert_eq!(fight.group(Marker::Moon).names(fight.roster()), vec!["Shield"]);
    }

    #[test]
    fn test_flex_healer_is_placed_as_healer() {
        let mut fight = AlAkir::new(
            roster(&[("Bones", "Blood_Tank"), ("Tree", "Restoration"), ("Bolt", "Elemental")]),
            1,
        );
        fight.optimize().unwrap();
        assert_eq!(fight.group(Marker::Skull).names(fight.roster()), vec!["Tree"]);
        assert_eq!(fight.group(Marker::Diamond).names(fight.roster()), vec!["Bolt"]);
    }

    #[test]
    fn test_unflexed_elemental_goes_ranged() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank"), ("Bolt", "Elemental")]), 0);
        fight.optimize().unwrap();
        assert_eq!(fight.group(Marker::Skull).names(fight.roster()), vec!["Bolt"]);
    }

    #[test]
    fn test_death_knights_fill_cross() {
        let mut fight = AlAkir::new(
            roster(&[
                ("Bones", "Blood_Tank"),
                ("Dk1", "Frost_DPS"),
                ("Dk2", "Unholy_DPS"),
                ("Dk3", "Blood_DPS"),
                ("Dk4", "Frost_DPS"),
            ]),
            0,
        );
        fight.optimize().unwrap();
        assert_eq!(
            fight.group(Marker::Cross).names(fight.roster()),
            vec!["Dk1", "Dk2", "Dk3"]
        );
        assert_eq!(fight.group(Marker::Triangle).names(fight.roster()), vec!["Dk4"]);
    }

    #[test]
    fn test_load_adopts_existing_names() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank"), ("Rogue", "Combat")]), 0);
        let mut grid = CellGrid::blank(15, 28);
        grid.set(1, 15, "Rogue");
        grid.set(2, 15, "Stranger");
        fight.load(&grid);
        fight.optimize().unwrap();

        assert_eq!(fight.group(Marker::Diamond).names(fight.roster()), vec!["Rogue"]);
        assert!(fight.group(Marker::Triangle).is_empty());
    }

    #[test]
    fn test_fully_optimize_ignores_loaded_positions() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank"), ("Rogue", "Combat")]), 0);
        let mut grid = CellGrid::blank(15, 28);
        grid.set(1, 15, "Rogue");
        fight.load(&grid);
        fight.fully_optimize().unwrap();

        assert!(fight.group(Marker::Diamond).is_empty());
        assert_eq!(fight.group(Marker::Triangle).names(fight.roster()), vec!["Rogue"]);
    }

    #[test]
    fn test_writes_blank_unused_rows() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank")]), 0);
        fight.optimize().unwrap();
        let writes = fight.writes();

        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].range, ALAKIR_RANGE);
        assert_eq!(writes[0].rows[9][22], "Bones");
        assert_eq!(writes[0].rows[10][22], "");
        assert_eq!(writes[0].rows.len(), 15);
    }

    #[test]
    fn test_writes_keep_cells_outside_groups() {
        let mut fight = AlAkir::new(roster(&[("Bones", "Blood_Tank")]), 0);
        let mut grid = CellGrid::blank(15, 28);
        grid.set(0, 1, "Skull");
        grid.set(2, 1, "Gone");
        fight.load(&grid);
        fight.reset();
        fight.optimize().unwrap();

        let rows = &fight.writes()[0].rows;
        assert_eq!(rows[0][1], "Skull");
        assert_eq!(rows[2][1], "");
        assert_eq!(rows[9][22], "Bones");
    }

    fn tank_and(count: usize, prefix: &str, token: &str) -> RaidRoster {
        let mut roster = roster(&[("Bones", "Blood_Tank")]);
        for i in 0..count {
            roster.add_raider(Raider::new(
                format!("{prefix}{i}"),
                SpecInfo::from_raid_helper(token).unwrap(),
            ));
        }
        roster
    }

    #[test]
    fn test_healers_fall_back_to_ranged_spot() {
        let mut fight = AlAkir::new(tank_and(9, "Hymn", "Holy"), 0);
        fight.optimize().unwrap();

        for marker in Marker::ALL {
            assert!(fight.group(marker).has_healer(fight.roster(), 0), "{}", marker.label());
        }
        assert_eq!(
            fight.group(Marker::Skull).names(fight.roster()),
            vec!["Hymn0", "Hymn8"]
        );
    }

    #[test]
    fn test_melee_overflow_goes_to_ranged_groups() {
        let mut fight = AlAkir::new(tank_and(21, "Rogue", "Combat"), 0);
        fight.optimize().unwrap();

        for marker in Marker::MELEE_ORDER {
            assert_eq!(fight.group(marker).len(), HARD_CAP, "{}", marker.label());
        }
        assert_eq!(fight.group(Marker::Skull).names(fight.roster()), vec!["Rogue20"]);
    }

    #[test]
    fn test_no_open_slot_when_every_group_is_full() {
        let mut fight = AlAkir::new(tank_and(31, "Rogue", "Combat"), 0);
        fight.optimize().unwrap();
        assert!(Marker::ALL.iter().all(|m| fight.group(*m).len() == HARD_CAP));

        let mut fight = AlAkir::new(tank_and(32, "Rogue", "Combat"), 0);
        assert!(matches!(
            fight.optimize(),
            Err(AssignError::NoOpenSlot { .. })
        ));
    }

    #[test]
    fn test_roster_without_tank_fails() {
        let mut fight = AlAkir::new(roster(&[("Rogue", "Combat")]), 0);
        assert!(matches!(
            fight.optimize(),
            Err(AssignError::RaiderUnavailable { .. })
        ));
    }

    const TOKENS: [&str; 16] = [
        "Blood_Tank",
        "Protection1",
        "Frost_DPS",
        "Unholy_DPS",
        "Arms",
        "Feral",
        "Combat",
        "Enhancement",
        "Elemental",
        "Restoration",
        "Restoration1",
        "Holy1",
        "Discipline",
        "Fire",
        "Affliction",
        "Survival",
    ];

    proptest! {
        #[test]
        fn prop_every_raider_placed_once(
            picks in prop::collection::vec(0..TOKENS.len(), 0..31),
            flex in 0u32..3,
        ) {
            let mut raiders = vec![Raider::new("Tank", SpecInfo::from_raid_helper("Blood_Tank").unwrap())];
            for (i, pick) in picks.iter().enumerate() {
                raiders.push(Raider::new(
                    format!("Raider{i}"),
                    SpecInfo::from_raid_helper(TOKENS[*pick]).unwrap(),
                ));
            }
            let total = raiders.len();
            let mut fight = AlAkir::new(RaidRoster::from_raiders(raiders), flex);
            fight.optimize().unwrap();

            let mut seen = HashSet::new();
            for marker in Marker::ALL {
                let group = fight.group(marker);
                prop_assert!(group.len() <= HARD_CAP);
                for id in group.members() {
                    prop_assert!(seen.insert(*id));
                }
            }
            prop_assert_eq!(seen.len(), total);
        }
    }
}
