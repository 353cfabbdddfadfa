//! Chimaeron positions
//!
//! Ten melee slots down the right-hand column and fifteen ranged slots down
//! the left-hand column of the assignment block. Slots are numbered from 1
//! top-down and filled in a fixed priority order.

use crate::assignments::core::{Encounter, RangeWrite, EMPTY_SLOT};
use crate::error::{AssignError, AssignResult};
use crate::roster::{Claims, RaidRoster, RaiderId};
use crate::sheets::CellGrid;
use tracing::debug;

pub const CHIMAERON_RANGE: &str = "BWD Assigns!AV97:BG111";

const RANGE_HEIGHT: usize = 15;
const RANGE_WIDTH: usize = 12;
const MELEE_COLUMN: usize = RANGE_WIDTH - 1;
const RANGED_COLUMN: usize = 0;

const MELEE_PRIORITY: [usize; 10] = [5, 6, 7, 3, 8, 4, 9, 2, 10, 1];
const RANGED_PRIORITY: [usize; 15] = [4, 5, 3, 6, 2, 7, 12, 11, 13, 10, 14, 9, 15, 1, 8];
const WARLOCK_MELEE_SLOTS: [usize; 4] = [1, 10, 9, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Melee(usize),
    Ranged(usize),
}

impl Slot {
    fn cell(self) -> (usize, usize) {
        match self {
            Slot::Melee(n) => (n - 1, MELEE_COLUMN),
            Slot::Ranged(n) => (n - 1, RANGED_COLUMN),
        }
    }
}

pub struct Chimaeron {
    claims: Claims,
    melee: [Option<RaiderId>; 10],
    ranged: [Option<RaiderId>; 15],
    cells: CellGrid,
}

impl Chimaeron {
    pub fn new(roster: RaidRoster) -> Self {
        Self {
            claims: Claims::new(roster),
            melee: [None; 10],
            ranged: [None; 15],
            cells: CellGrid::blank(RANGE_HEIGHT, RANGE_WIDTH),
        }
    }

    pub fn roster(&self) -> &RaidRoster {
        self.claims.roster()
    }

    /// Raider holding a slot
    pub fn at(&self, slot: Slot) -> Option<RaiderId> {
        match slot {
            Slot::Melee(n) => self.melee[n - 1],
            Slot::Ranged(n) => self.ranged[n - 1],
        }
    }

    fn set(&mut self, slot: Slot, id: RaiderId) {
        debug!(raider = self.claims.roster().name(id), ?slot, "Placed");
        match slot {
            Slot::Melee(n) => self.melee[n - 1] = Some(id),
            Slot::Ranged(n) => self.ranged[n - 1] = Some(id),
        }
        self.claims.claim(id);
    }

    fn first_free_melee(&self) -> Option<Slot> {
        MELEE_PRIORITY
            .iter()
            .map(|n| Slot::Melee(*n))
            .find(|slot| self.at(*slot).is_none())
    }

    fn first_free_ranged(&self) -> Option<Slot> {
        RANGED_PRIORITY
            .iter()
            .map(|n| Slot::Ranged(*n))
            .find(|slot| self.at(*slot).is_none())
    }

    pub fn next_melee_spot(&self) -> AssignResult<Slot> {
        self.first_free_melee()
            .or_else(|| self.first_free_ranged())
            .ok_or_else(|| AssignError::no_open_slot(self.name()))
    }

    pub fn next_ranged_spot(&self) -> AssignResult<Slot> {
        self.first_free_ranged()
            .or_else(|| self.first_free_melee())
            .ok_or_else(|| AssignError::no_open_slot(self.name()))
    }

    fn place_all<F>(&mut self, ids: Vec<RaiderId>, spot: F) -> AssignResult<()>
    where
        F: Fn(&Self) -> AssignResult<Slot>,
    {
        for id in ids {
            if !self.claims.is_claimed(id) {
                let slot = spot(self)?;
                self.set(slot, id);
            }
        }
        Ok(())
    }

    fn slots(&self) -> impl Iterator<Item = Slot> {
        (1..=15).map(Slot::Ranged).chain((1..=10).map(Slot::Melee))
    }
}

impl Encounter for Chimaeron {
    fn name(&self) -> &'static str {
        "Chimaeron"
    }

    fn read_range(&self) -> Option<&'static str> {
        Some(CHIMAERON_RANGE)
    }

    fn load(&mut self, grid: &CellGrid) {
        self.cells = grid.clone();
        for slot in self.slots().collect::<Vec<_>>() {
            let (row, col) = slot.cell();
            if let Some(id) = self.claims.roster().get_raider_by_name(grid.get(row, col)) {
                if !self.claims.is_claimed(id) {
                    self.set(slot, id);
                }
            }
        }
    }

    fn reset(&mut self) {
        self.melee = [None; 10];
        self.ranged = [None; 15];
        self.claims.release_all();
    }

    fn optimize(&mut self) -> AssignResult<()> {
        let roster = self.claims.roster().clone();

        // The main tank holds the boss and has no slot
        let main_tank = roster.main_tank()?;
        self.claims.claim(main_tank);

        self.place_all(roster.rogues(), Self::next_melee_spot)?;
        self.place_all(roster.healers(0), Self::next_ranged_spot)?;
        self.place_all(roster.melee(), Self::next_melee_spot)?;
        self.place_all(roster.tanks(), Self::next_melee_spot)?;

        for id in roster.warlocks() {
            if self.claims.is_claimed(id) {
                continue;
            }
            let open = WARLOCK_MELEE_SLOTS
                .iter()
                .map(|n| Slot::Melee(*n))
                .find(|slot| self.at(*slot).is_none());
            if let Some(slot) = open {
                self.set(slot, id);
            }
        }

        self.place_all(roster.ranged(), Self::next_ranged_spot)?;
        Ok(())
    }

    fn writes(&self) -> Vec<RangeWrite> {
        let mut grid = self.cells.clone();
        let roster = self.claims.roster();
        for slot in self.slots() {
            let (row, col) = slot.cell();
            let text = self.at(slot).map_or(EMPTY_SLOT, |id| roster.name(id));
            grid.set(row, col, text);
        }
        vec![RangeWrite::from_grid(CHIMAERON_RANGE, grid)]
    }

    fn summary(&self) -> Vec<String> {
        let roster = self.claims.roster();
        self.slots()
            .map(|slot| {
                let label = match slot {
                    Slot::Melee(n) => format!("melee {n}"),
                    Slot::Ranged(n) => format!("ranged {n}"),
                };
                let name = self.at(slot).map_or(EMPTY_SLOT, |id| roster.name(id));
                format!("{label}: {name}")
            })
            .collect()
    }
}
