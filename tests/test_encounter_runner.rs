//! End-to-end encounter runs against the in-memory sheet


use raidslots::assignments::tier_11::alakir::ALAKIR_RANGE;
use raidslots::assignments::tier_11::chimaeron::CHIMAERON_RANGE;
use raidslots::assignments::tier_11::conclave::CONCLAVE_RANGE;
use raidslots::assignments::{Boss, EncounterOptions, EncounterRunner, RunOptions, Tier};
use raidslots::error::AssignError;
use raidslots::raid_helper::RosterSource;
use raidslots::testing::{MockRosterSource, MockSheets};
use std::sync::Arc;
use test_helpers::{full_roster, grid_with, roster};

fn runner(sheets: &Arc<MockSheets>, reset: bool, dry_run: bool) -> EncounterRunner<MockSheets> {
    EncounterRunner::new(sheets.clone(), RunOptions { reset, dry_run })
}

#[tokio::test]
async fn test_alakir_run_keeps_existing_placements() {
    let sheets = Arc::new(MockSheets::new());
    sheets
        .set_range(ALAKIR_RANGE, grid_with(15, 28, &[(0, 1, "Skull"), (1, 1, "Stabby")]))
        .await;

    let outcome = runner(&sheets, false, false)
        .run_boss(Boss::AlAkir, &full_roster(), &EncounterOptions::default())
        .await
        .unwrap();

    assert!(outcome.written);
    assert_eq!(outcome.encounter, "Al'Akir");
    assert_eq!(sheets.get_reads().await.len(), 1);

    let rows = sheets.written(ALAKIR_RANGE).await.unwrap();
    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0][1], "Skull");
    assert_eq!(rows[1][1], "Stabby");
}

#[tokio::test]
async fn test_reset_ignores_existing_names_but_keeps_labels() {
    let sheets = Arc::new(MockSheets::new());
    sheets
        .set_range(ALAKIR_RANGE, grid_with(15, 28, &[(0, 1, "Skull"), (1, 1, "Stabby")]))
        .await;

    runner(&sheets, true, false)
        .run_boss(Boss::AlAkir, &full_roster(), &EncounterOptions::default())
        .await
        .unwrap();

    let rows = sheets.written(ALAKIR_RANGE).await.unwrap();
    assert_eq!(rows[0][1], "Skull");
    assert_eq!(rows[1][1], "Bolt");
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let sheets = Arc::new(MockSheets::new());

    let outcome = runner(&sheets, false, true)
        .run_boss(Boss::Chimaeron, &full_roster(), &EncounterOptions::default())
        .await
        .unwrap();

    assert!(!outcome.written);
    assert_eq!(outcome.writes.len(), 1);
    assert!(sheets.get_writes().await.is_empty());
    assert_eq!(outcome.summary.len(), 25);
}

#[tokio::test]
async fn test_tier_11_writes_every_boss_range() {
    let sheets = Arc::new(MockSheets::new());

    let outcomes = runner(&sheets, false, false)
        .run_tier(Tier::Eleven, &full_roster(), &EncounterOptions { flex_healers: 1 })
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(sheets.get_writes().await.len(), 3);
    for range in [ALAKIR_RANGE, CHIMAERON_RANGE, CONCLAVE_RANGE] {
        assert!(sheets.written(range).await.is_some(), "{range} not written");
    }
}

#[tokio::test]
async fn test_tier_12_writes_shannox_only() {
    let sheets = Arc::new(MockSheets::new());

    let outcomes = runner(&sheets, false, false)
        .run_tier(Tier::Twelve, &full_roster(), &EncounterOptions::default())
        .await
        .unwrap();

    assert_eq!(outcomes[0].encounter, "Shannox");
    assert_eq!(outcomes[0].writes.len(), 13);
    assert!(outcomes[1].writes.is_empty());
    assert!(!outcomes[1].written);
    assert_eq!(sheets.get_writes().await.len(), 13);
    assert!(sheets.get_reads().await.is_empty());

    let shannox_tank = sheets.written("Shannox!C7:G7").await.unwrap();
    assert_eq!(shannox_tank[0][1], "Bones");
}

#[tokio::test]
async fn test_sheets_failure_propagates() {
    let sheets = Arc::new(MockSheets::with_failure());

    let result = runner(&sheets, false, false)
        .run_boss(Boss::Conclave, &full_roster(), &EncounterOptions::default())
        .await;

    assert!(matches!(result, Err(AssignError::Sheets(_))));
}

#[tokio::test]
async fn test_roster_without_tanks_fails() {
    let sheets = Arc::new(MockSheets::new());
    let no_tanks = roster(&[("Light", "Holy1"), ("Stabby", "Combat")]);

    let result = runner(&sheets, false, false)
        .run_boss(Boss::AlAkir, &no_tanks, &EncounterOptions::default())
        .await;

    assert!(matches!(result, Err(AssignError::RaiderUnavailable { .. })));
    assert!(sheets.get_writes().await.is_empty());
}

#[tokio::test]
async fn test_roster_source_feeds_runner() {
    let source = MockRosterSource::new(full_roster());
    let fetched = source.fetch_roster(1283260754786517025).await.unwrap();
    assert_eq!(source.requested.lock().await.as_slice(), &[1283260754786517025]);

    let sheets = Arc::new(MockSheets::new());
    let outcome = runner(&sheets, false, false)
        .run_boss(Boss::Conclave, &fetched, &EncounterOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.writes.len(), 1);
    assert!(sheets.written(CONCLAVE_RANGE).await.is_some());
}
