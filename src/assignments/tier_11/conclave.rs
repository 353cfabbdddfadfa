//! Conclave of Wind platform split
//!
//! Three platforms, one column each: Anshal, Rohash and Nezir. The main tank
//! holds Nezir, off tanks and melee share Anshal and Nezir, and ranged stack
//! on Rohash.

use crate::assignments::core::{summary_line, Assignment, Encounter, RangeWrite};
use crate::error::{AssignError, AssignResult};
use crate::roster::{Claims, RaidRoster, RaiderId, WowClass};
use crate::sheets::CellGrid;
use tracing::debug;

pub const CONCLAVE_RANGE: &str = "TotFW Assigns!AU19:BO30";

const RANGE_HEIGHT: usize = 12;
const RANGE_WIDTH: usize = 21;
const MAX_HEALERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Anshal,
    Rohash,
    Nezir,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Anshal, Platform::Rohash, Platform::Nezir];

    fn index(self) -> usize {
        self as usize
    }

    fn column(self) -> usize {
        match self {
            Platform::Anshal => 1,
            Platform::Rohash => 8,
            Platform::Nezir => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Anshal => "anshal",
            Platform::Rohash => "rohash",
            Platform::Nezir => "nezir",
        }
    }
}

pub struct Conclave {
    claims: Claims,
    platforms: [Assignment; 3],
    flex_healers: u32,
    cells: CellGrid,
}

impl Conclave {
    pub fn new(roster: RaidRoster, flex_healers: u32) -> Self {
        Self {
            claims: Claims::new(roster),
            platforms: Default::default(),
            flex_healers,
            cells: CellGrid::blank(RANGE_HEIGHT, RANGE_WIDTH),
        }
    }

    pub fn platform(&self, platform: Platform) -> &Assignment {
        &self.platforms[platform.index()]
    }

    pub fn roster(&self) -> &RaidRoster {
        self.claims.roster()
    }

    fn has_room(&self, platform: Platform) -> bool {
        *self.platform(platform) < RANGE_HEIGHT
    }

    fn add(&mut self, platform: Platform, id: RaiderId) -> AssignResult<()> {
        if !self.has_room(platform) {
            return Err(AssignError::no_open_slot(self.name()));
        }
        self.place(platform, id);
        Ok(())
    }

    fn place(&mut self, platform: Platform, id: RaiderId) {
        if self.claims.claim(id) {
            debug!(raider = self.claims.roster().name(id), platform = platform.label(), "Placed");
            self.platforms[platform.index()].push(id);
        }
    }

    fn healers_on(&self, platform: Platform) -> usize {
        self.platform(platform)
            .healer_count(self.claims.roster(), self.flex_healers)
    }

    fn smallest(&self, candidates: &[Platform]) -> AssignResult<Platform> {
        candidates
            .iter()
            .copied()
            .filter(|p| self.has_room(*p))
            .min_by_key(|p| self.platform(*p).len())
            .ok_or_else(|| AssignError::no_open_slot(self.name()))
    }

    fn healer_platform(&self, id: RaiderId) -> AssignResult<Platform> {
        let class = self.claims.raider(id).wow_class;
        if matches!(class, WowClass::Shaman | WowClass::Paladin)
            && self.healers_on(Platform::Nezir) < MAX_HEALERS
        {
            return Ok(Platform::Nezir);
        }
        [Platform::Anshal, Platform::Rohash, Platform::Nezir]
            .into_iter()
            .find(|p| self.healers_on(*p) < MAX_HEALERS && self.has_room(*p))
            .map_or_else(|| self.smallest(&Platform::ALL), Ok)
    }
}

impl Encounter for Conclave {
    fn name(&self) -> &'static str {
        "Conclave of Wind"
    }

    fn read_range(&self) -> Option<&'static str> {
        Some(CONCLAVE_RANGE)
    }

    fn load(&mut self, grid: &CellGrid) {
        self.cells = grid.clone();
        for row in 0..RANGE_HEIGHT {
            for platform in Platform::ALL {
                let found = self
                    .claims
                    .roster()
                    .get_raider_by_name(grid.get(row, platform.column()));
                // At most one name per row, so a platform never overflows here
                if let Some(id) = found {
                    self.place(platform, id);
                }
            }
        }
    }

    fn reset(&mut self) {
        for platform in &mut self.platforms {
            platform.clear();
        }
        self.claims.release_all();
    }

    fn optimize(&mut self) -> AssignResult<()> {
        let roster = self.claims.roster().clone();

        let main_tank = roster.main_tank()?;
        if !self.claims.is_claimed(main_tank) {
            self.add(Platform::Nezir, main_tank)?;
        }
        for id in self.claims.free(roster.tanks()) {
            self.add(Platform::Anshal, id)?;
        }

        for id in self.claims.free(roster.healers(self.flex_healers)) {
            let platform = self.healer_platform(id)?;
            self.add(platform, id)?;
        }

        for id in self.claims.free(roster.melee()) {
            let platform = self.smallest(&[Platform::Anshal, Platform::Nezir])?;
            self.add(platform, id)?;
        }

        for id in self.claims.free(roster.ranged()) {
            let platform = if self.has_room(Platform::Rohash) {
                Platform::Rohash
            } else {
                self.smallest(&Platform::ALL)?
            };
            self.add(platform, id)?;
        }
        Ok(())
    }

    fn writes(&self) -> Vec<RangeWrite> {
        let mut grid = self.cells.clone();
        let roster = self.claims.roster();
        for platform in Platform::ALL {
            let names = self.platform(platform).names(roster);
            for row in 0..RANGE_HEIGHT {
                let name = names.get(row).copied().unwrap_or_default();
                grid.set(row, platform.column(), name);
            }
        }
        vec![RangeWrite::from_grid(CONCLAVE_RANGE, grid)]
    }

    fn summary(&self) -> Vec<String> {
        let roster = self.claims.roster();
        Platform::ALL
            .into_iter()
            .map(|p| summary_line(p.label(), &self.platform(p).names(roster)))
            .collect()
    }
}
