//! Beth'tilac web and floor assignments
//!
//! The plan is reported through the summary only; the Beth'tilac sheet tab
//! has no assignment block yet.

use crate::assignments::core::{summary_line, Assignment, Encounter, RangeWrite, EMPTY_SLOT};
use crate::error::AssignResult;
use crate::roster::{Claims, RaidRoster, RaiderId, SOAKER_PREFERENCE};
use crate::sheets::CellGrid;
use tracing::{debug, warn};

const MELEE_GROUPS: usize = 3;

pub struct Bethtilac {
    claims: Claims,
    bethtilac_tank: Option<RaiderId>,
    bethtilac_healer: Option<RaiderId>,
    drone_tank: Option<RaiderId>,
    drone_healer: Option<RaiderId>,
    drone_dps: Assignment,
    bethtilac_dps: Assignment,
    melee_groups: [Assignment; MELEE_GROUPS],
}

impl Bethtilac {
    pub fn new(roster: RaidRoster) -> Self {
        Self {
            claims: Claims::new(roster),
            bethtilac_tank: None,
            bethtilac_healer: None,
            drone_tank: None,
            drone_healer: None,
            drone_dps: Assignment::new(),
            bethtilac_dps: Assignment::new(),
            melee_groups: Default::default(),
        }
    }

    pub fn roster(&self) -> &RaidRoster {
        self.claims.roster()
    }

    pub fn bethtilac_tank(&self) -> Option<RaiderId> {
        self.bethtilac_tank
    }

    pub fn bethtilac_healer(&self) -> Option<RaiderId> {
        self.bethtilac_healer
    }

    pub fn drone_tank(&self) -> Option<RaiderId> {
        self.drone_tank
    }

    pub fn drone_healer(&self) -> Option<RaiderId> {
        self.drone_healer
    }

    pub fn drone_dps(&self) -> &Assignment {
        &self.drone_dps
    }

    pub fn bethtilac_dps(&self) -> &Assignment {
        &self.bethtilac_dps
    }

    pub fn melee_group(&self, index: usize) -> &Assignment {
        &self.melee_groups[index]
    }

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

    fn claim_into_group(&mut self, group: usize, id: RaiderId) {
        if self.claims.claim(id) {
            self.melee_groups[group].push(id);
        }
    }

    fn assign_melee_groups(&mut self) {
        for group in 0..MELEE_GROUPS {
            if self.melee_groups[group].soaker_count(self.claims.roster()) > 0 {
                continue;
            }
            match self.claims.pick(&SOAKER_PREFERENCE, true) {
                Ok(id) => self.claim_into_group(group, id),
                Err(_) => warn!(group = group + 1, "No soaker available for melee group"),
            }
        }

        for id in self.claims.raiders(&SOAKER_PREFERENCE) {
            let roster = self.claims.roster();
            let group = (0..MELEE_GROUPS)
                .min_by_key(|g| self.melee_groups[*g].soaker_count(roster))
                .unwrap_or(0);
            self.claim_into_group(group, id);
        }

        for id in self.claims.free(self.claims.roster().melee()) {
            let group = (0..MELEE_GROUPS)
                .min_by_key(|g| self.melee_groups[*g].len())
                .unwrap_or(0);
            self.claim_into_group(group, id);
        }
    }

    pub fn soakers_per_group(&self) -> [usize; MELEE_GROUPS] {
        let roster = self.claims.roster();
        [0, 1, 2].map(|g| self.melee_groups[g].soaker_count(roster))
    }
}

impl Encounter for Bethtilac {
    fn name(&self) -> &'static str {
        "Beth'tilac"
    }

    fn read_range(&self) -> Option<&'static str> {
        None
    }

    fn load(&mut self, _grid: &CellGrid) {}

    fn reset(&mut self) {
        self.bethtilac_tank = None;
        self.bethtilac_healer = None;
        self.drone_tank = None;
        self.drone_healer = None;
        self.drone_dps.clear();
        self.bethtilac_dps.clear();
        for group in &mut self.melee_groups {
            group.clear();
        }
        self.claims.release_all();
    }

    fn optimize(&mut self) -> AssignResult<()> {
        if self.bethtilac_tank.is_none() {
            let main_tank = self.claims.roster().main_tank()?;
            self.bethtilac_tank = self.fill("bethtilac tank", Ok(main_tank));
        }
        if self.bethtilac_healer.is_none() {
            let picked = self.claims.healer(&["restoration shaman"]);
            self.bethtilac_healer = self.fill("bethtilac healer", picked);
        }
        if self.drone_tank.is_none() {
            let picked = self.claims.next_tank();
            self.drone_tank = self.fill("drone tank", picked);
        }
        if self.drone_healer.is_none() {
            let picked = self.claims.healer(&["holy paladin"]);
            self.drone_healer = self.fill("drone healer", picked);
        }
        if self.drone_dps.is_empty() {
            for id in self.claims.dps(&["shadow priest", "balance druid"]) {
                self.claims.claim(id);
                self.drone_dps.push(id);
            }
        }
        if self.bethtilac_dps.is_empty() {
            for id in self.claims.free(self.claims.roster().rogues()) {
                self.claims.claim(id);
                self.bethtilac_dps.push(id);
            }
        }
        self.assign_melee_groups();
        Ok(())
    }

    fn writes(&self) -> Vec<RangeWrite> {
        Vec::new()
    }

    fn summary(&self) -> Vec<String> {
        let roster = self.claims.roster();
        let name = |id: Option<RaiderId>| id.map_or(EMPTY_SLOT, |id| roster.name(id));
        let mut lines = vec![
            format!("bethtilac tank: {}", name(self.bethtilac_tank)),
            format!("bethtilac healer: {}", name(self.bethtilac_healer)),
            format!("drone tank: {}", name(self.drone_tank)),
            format!("drone healer: {}", name(self.drone_healer)),
            summary_line("drone dps", &self.drone_dps.names(roster)),
            summary_line("bethtilac dps", &self.bethtilac_dps.names(roster)),
        ];
        for (i, group) in self.melee_groups.iter().enumerate() {
            lines.push(summary_line(&format!("melee group {}", i + 1), &group.names(roster)));
        }
        lines
    }
}
