//! Boss encounter assignment
//!
//! Each boss is an [`Encounter`]. The [`EncounterRunner`] drives one through
//! its cycle against a [`SheetsClient`]: read the boss's range, adopt what is
//! already there, place everyone else, then write the result back.

pub mod core;
pub mod tier_11;
pub mod tier_12;

pub use self::core::{is_soaker, Assignment, Encounter, RangeWrite, EMPTY_SLOT};
pub use tier_11::{AlAkir, Chimaeron, Conclave};
pub use tier_12::{Bethtilac, Shannox};

use crate::encounter_span;
use crate::error::{AssignError, AssignResult};
use crate::roster::RaidRoster;
use crate::sheets::{A1Range, SheetsClient};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, Instrument};

/// Knobs that change how encounters place raiders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncounterOptions {
    /// Elemental shamans pulled into healer positions
    pub flex_healers: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boss {
    AlAkir,
    Chimaeron,
    Conclave,
    Shannox,
    Bethtilac,
}

impl Boss {
    pub const ALL: [Boss; 5] = [
        Boss::AlAkir,
        Boss::Chimaeron,
        Boss::Conclave,
        Boss::Shannox,
        Boss::Bethtilac,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Boss::AlAkir => "alakir",
            Boss::Chimaeron => "chimaeron",
            Boss::Conclave => "conclave",
            Boss::Shannox => "shannox",
            Boss::Bethtilac => "bethtilac",
        }
    }

    /// Build the encounter over its own copy of the roster
    pub fn build(&self, roster: &RaidRoster, options: &EncounterOptions) -> Box<dyn Encounter> {
        let roster = roster.clone();
        match self {
            Boss::AlAkir => Box::new(AlAkir::new(roster, options.flex_healers)),
            Boss::Chimaeron => Box::new(Chimaeron::new(roster)),
            Boss::Conclave => Box::new(Conclave::new(roster, options.flex_healers)),
            Boss::Shannox => Box::new(Shannox::new(roster)),
            Boss::Bethtilac => Box::new(Bethtilac::new(roster)),
        }
    }
}

impl fmt::Display for Boss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boss {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "alakir" => Ok(Boss::AlAkir),
            "chimaeron" => Ok(Boss::Chimaeron),
            "conclave" | "conclaveofwind" => Ok(Boss::Conclave),
            "shannox" => Ok(Boss::Shannox),
            "bethtilac" => Ok(Boss::Bethtilac),
            _ => Err(AssignError::UnknownEncounter(s.to_string())),
        }
    }
}

/// A raid tier and the bosses run for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Throne of the Four Winds and Blackwing Descent
    Eleven,
    /// Firelands
    Twelve,
}

impl Tier {
    pub fn from_number(tier: u8) -> AssignResult<Self> {
        match tier {
            11 => Ok(Tier::Eleven),
            12 => Ok(Tier::Twelve),
            other => Err(AssignError::UnknownTier(other)),
        }
    }

    pub fn bosses(&self) -> &'static [Boss] {
        match self {
            Tier::Eleven => &[Boss::AlAkir, Boss::Chimaeron, Boss::Conclave],
            Tier::Twelve => &[Boss::Shannox, Boss::Bethtilac],
        }
    }
}

/// How a run treats the sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Ignore positions already in the sheet
    pub reset: bool,
    /// Compute everything but write nothing
    pub dry_run: bool,
}

/// What one encounter run produced
#[derive(Debug, Clone)]
pub struct EncounterOutcome {
    pub encounter: &'static str,
    pub writes: Vec<RangeWrite>,
    pub written: bool,
    pub summary: Vec<String>,
}

pub struct EncounterRunner<S: SheetsClient + ?Sized> {
    sheets: Arc<S>,
    options: RunOptions,
}

impl<S: SheetsClient + ?Sized> EncounterRunner<S> {
    pub fn new(sheets: Arc<S>, options: RunOptions) -> Self {
        Self { sheets, options }
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Read, optimize and write one encounter
    pub async fn run(&self, mut encounter: Box<dyn Encounter>) -> AssignResult<EncounterOutcome> {
        let name = encounter.name();
        let span = encounter_span!(
            boss = name,
            reset = self.options.reset,
            dry_run = self.options.dry_run
        );

        async move {
            if let Some(range_text) = encounter.read_range() {
                let range: A1Range = range_text.parse()?;
                let grid = self.sheets.get_range(&range).await?;
                debug!(range = %range, rows = grid.height(), "Loaded existing assignments");
                encounter.load(&grid);
                if self.options.reset {
                    encounter.reset();
                }
            }

            encounter.optimize()?;
            let writes = encounter.writes();

            let written = !self.options.dry_run && !writes.is_empty();
            if written {
                for write in &writes {
                    let range: A1Range = write.range.parse()?;
                    self.sheets.write_range(&range, &write.rows).await?;
                    debug!(range = %range, "Wrote assignments");
                }
            }

            let summary = encounter.summary();
            for line in &summary {
                info!("{line}");
            }
            info!(writes = writes.len(), written, "Encounter complete");

            Ok(EncounterOutcome {
                encounter: name,
                writes,
                written,
                summary,
            })
        }
        .instrument(span)
        .await
    }

    /// Run one boss
    pub async fn run_boss(
        &self,
        boss: Boss,
        roster: &RaidRoster,
        options: &EncounterOptions,
    ) -> AssignResult<EncounterOutcome> {
        self.run(boss.build(roster, options)).await
    }

    /// Run every boss of a tier in order, stopping at the first failure
    pub async fn run_tier(
        &self,
        tier: Tier,
        roster: &RaidRoster,
        options: &EncounterOptions,
    ) -> AssignResult<Vec<EncounterOutcome>> {
        let mut outcomes = Vec::with_capacity(tier.bosses().len());
        for boss in tier.bosses() {
            outcomes.push(self.run_boss(*boss, roster, options).await?);
        }
        Ok(outcomes)
    }
}
