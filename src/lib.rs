//! raidslots - raid roster slot assignment
//!
//! Places the raiders signed up for a raid into per-boss positions and keeps
//! a Google Sheet of assignments up to date.
//!
//! # Overview
//!
//! - [`raid_helper`] fetches the signed-up roster from Raid-Helper
//! - [`roster`] models raiders, their roles and who is already placed
//! - [`assignments`] holds one placement heuristic per boss
//! - [`sheets`] reads and writes A1 ranges through the Sheets API
//!
//! # Quick Start
//!
//! ```rust
//! use raidslots::assignments::{Boss, Encounter, EncounterOptions};
//! use raidslots::roster::{RaidRoster, Raider, SpecInfo};
//!
//! let roster = RaidRoster::from_raiders([
//!     Raider::new("Bones", SpecInfo::from_raid_helper("Blood_Tank").unwrap()),
//!     Raider::new("Light", SpecInfo::from_raid_helper("Holy1").unwrap()),
//!     Raider::new("Rogue", SpecInfo::from_raid_helper("Combat").unwrap()),
//! ]);
//!
//! let mut encounter = Boss::AlAkir.build(&roster, &EncounterOptions::default());
//! encounter.optimize().unwrap();
//! for line in encounter.summary() {
//!     println!("{line}");
//! }
//! ```

pub mod assignments;
pub mod config;
pub mod error;
pub mod observability;
pub mod raid_helper;
pub mod roster;
pub mod sheets;
pub mod testing;

pub use assignments::{
    Boss, Encounter, EncounterOptions, EncounterOutcome, EncounterRunner, RunOptions, Tier,
};
pub use config::{AppConfig, ConfigError};
pub use error::{AssignError, AssignResult};
pub use raid_helper::{RaidHelperClient, RaidHelperConfig, RaidHelperError, RosterSource};
pub use roster::{RaidRoster, Raider, RaiderId, RosterSnapshot};
pub use sheets::{A1Range, CellGrid, GoogleSheetsClient, GoogleSheetsConfig, SheetsClient, SheetsError};
