//! Integration tests for the Raid-Helper roster client


use raidslots::raid_helper::{RaidHelperClient, RaidHelperConfig, RaidHelperError, RosterSource};
use raidslots::roster::{Role, WowClass};
use test_helpers::test_config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: &str) -> RaidHelperClient {
    RaidHelperClient::new(RaidHelperConfig::from(&test_config(base_url))).unwrap()
}

#[tokio::test]
async fn test_fetch_roster_maps_raid_drop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raidplan/1283260754786517025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Throne of the Four Winds",
            "raidDrop": [
                {"partyId": 1, "slotId": 1, "name": "Bones", "userid": "111", "spec": "Blood_Tank", "color": "#C41E3A"},
                {"partyId": 1, "slotId": 2, "name": "Bolt", "userid": "222", "spec": "Elemental", "color": "#0070DD"},
                {"partyId": 1, "slotId": 3, "name": null, "userid": null, "spec": null, "color": null},
                {"partyId": 2, "slotId": 1, "name": "Storm", "userid": "333", "spec": "Elemental", "color": "#0070DD"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let roster = client(&mock_server.uri())
        .fetch_roster(1283260754786517025)
        .await
        .unwrap();

    assert_eq!(roster.len(), 3);
    let bones = &roster.raiders()[0];
    assert_eq!(bones.name, "Bones");
    assert_eq!(bones.role, Role::Tanks);
    assert_eq!(bones.wow_class, WowClass::DeathKnight);
    assert_eq!(bones.color, "#C41E3A");

    assert_eq!(roster.raiders()[1].flex_healer, Some(0));
    assert_eq!(roster.raiders()[2].flex_healer, Some(1));
    assert_eq!(roster.raiders()[2].party, 2);
}

#[tokio::test]
async fn test_fetch_roster_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Raid not found"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri()).fetch_roster(1).await.unwrap_err();
    match err {
        RaidHelperError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Raid not found");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_roster_rejects_malformed_plan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "raidDrop": "not a list"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri()).fetch_roster(1).await.unwrap_err();
    assert!(matches!(err, RaidHelperError::InvalidResponse(_)));
}
