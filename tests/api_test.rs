//! Тесты сервиса приёма раздач поверх in-memory хранилища.

use serde_json::json;

use holdem_replay::api::{split_card_codes, validate_payload, ApiError, HandPayload, HandService, PayloadError, ServiceConfig};
use holdem_replay::domain::TableConfig;
use holdem_replay::engine::{ReplayOptions, SettlementStatus};
use holdem_replay::infra::InMemoryHandStore;

fn service() -> HandService<InMemoryHandStore> {
    HandService::new(ServiceConfig::new(TableConfig::new(10, 20)), InMemoryHandStore::new())
}

fn payload(id: &str, actions: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "dealer": "Alice",
        "smallBlind": "Alice",
        "bigBlind": "Bob",
        "players": [
            { "id": "p1", "name": "Alice", "stack": 1000, "cards": "As Ad" },
            { "id": "p2", "name": "Bob", "stack": 1000, "cards": "KcKd" }
        ],
        "actions": actions,
        "communityCards": [],
        "finalPot": 30
    })
}

fn parse(value: serde_json::Value) -> HandPayload {
    serde_json::from_value(value).unwrap()
}

#[test]
fn submit_replays_and_saves() {
    let mut svc = service();
    let resp = svc.submit_hand(parse(payload("h1", &["f"]))).unwrap();

    assert_eq!(resp.message, "Hand saved");
    assert_eq!(resp.id, "h1");
    assert_eq!(resp.status, SettlementStatus::Settled);
    assert_eq!(resp.payoffs.get("p1"), Some(&-10));
    assert_eq!(resp.payoffs.get("p2"), Some(&10));

    let stored = svc.get_hand("h1").unwrap();
    assert_eq!(stored.payoffs, Some(resp.payoffs));
    assert_eq!(stored.sequence, 1);
    assert_eq!(svc.store().len(), 1);
}

#[test]
fn duplicate_id_is_conflict() {
    let mut svc = service();
    svc.submit_hand(parse(payload("h1", &["f"]))).unwrap();

    let err = svc.submit_hand(parse(payload(" h1 ", &["f"]))).unwrap_err();
    assert_eq!(err, ApiError::Conflict("h1".to_string()));
    assert_eq!(svc.store().len(), 1);
}

#[test]
fn list_is_newest_first() {
    let mut svc = service();
    for id in ["h1", "h2", "h3"] {
        svc.submit_hand(parse(payload(id, &["f"]))).unwrap();
    }

    let ids: Vec<String> = svc.list_hands().into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["h3", "h2", "h1"]);
}

#[test]
fn unknown_hand_is_not_found() {
    let svc = service();
    assert_eq!(svc.get_hand("nope"), Err(ApiError::NotFound("nope".to_string())));
}

/// Отклонённая раздача не сохраняется.
#[test]
fn replay_errors_are_not_saved() {
    let mut svc = service();
    let err = svc.submit_hand(parse(payload("h1", &["c"]))).unwrap_err();

    assert!(matches!(err, ApiError::Replay(_)), "{err:?}");
    assert!(svc.store().is_empty());
}

#[test]
fn lenient_service_saves_tentative_payoffs() {
    let config = ServiceConfig::new(TableConfig::new(10, 20)).with_options(ReplayOptions::lenient());
    let mut svc = HandService::new(config, InMemoryHandStore::new());

    let resp = svc.submit_hand(parse(payload("h1", &["c", "x"]))).unwrap();
    assert_eq!(resp.status, SettlementStatus::Tentative);
    assert_eq!(svc.get_hand("h1").unwrap().status, Some(SettlementStatus::Tentative));
}

#[test]
fn payload_blind_amounts_override_service_defaults() {
    let mut value = payload("h1", &["f"]);
    value["smallBlindAmount"] = json!(50);
    value["bigBlindAmount"] = json!(100);

    let resp = service().submit_hand(parse(value)).unwrap();
    assert_eq!(resp.payoffs.get("p1"), Some(&-50));
    assert_eq!(resp.payoffs.get("p2"), Some(&50));
}

#[test]
fn submit_json_rejects_malformed_body() {
    let mut svc = service();
    let err = svc.submit_json("{ not json").unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let body = payload("h1", &["f"]).to_string();
    assert!(svc.submit_json(&body).is_ok());
}

#[test]
fn validation_catches_bad_shape() {
    let mut one_player = payload("h1", &["f"]);
    one_player["players"] = json!([{ "id": "p1", "name": "Alice", "stack": 1000, "cards": "AsAd" }]);
    assert_eq!(validate_payload(&parse(one_player)), Err(PayloadError::PlayerCount(1)));

    let mut negative = payload("h1", &["f"]);
    negative["finalPot"] = json!(-5);
    assert_eq!(validate_payload(&parse(negative)), Err(PayloadError::NegativeFinalPot(-5)));

    let mut dup = payload("h1", &["f"]);
    dup["players"][1]["id"] = json!("p1");
    assert_eq!(
        validate_payload(&parse(dup)),
        Err(PayloadError::DuplicatePlayerId("p1".to_string()))
    );

    assert_eq!(validate_payload(&parse(payload("  ", &["f"]))), Err(PayloadError::EmptyHandId));

    // Через сервис та же ошибка приходит как BadRequest.
    let mut negative = payload("h2", &["f"]);
    negative["finalPot"] = json!(-5);
    let err = service().submit_hand(parse(negative)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[test]
fn card_strings_with_and_without_spaces() {
    assert_eq!(split_card_codes("AsKd"), vec!["As", "Kd"]);
    assert_eq!(split_card_codes("As Kd"), vec!["As", "Kd"]);
    assert_eq!(split_card_codes(" 9h  Tc "), vec!["9h", "Tc"]);
    assert_eq!(split_card_codes("AsK"), vec!["As", "K"]);
}

#[test]
fn winnings_field_is_optional_and_ignored() {
    let mut value = payload("h1", &["f"]);
    value["players"][0]["winnings"] = json!(999);

    let resp = service().submit_hand(parse(value)).unwrap();
    assert_eq!(resp.payoffs.get("p1"), Some(&-10));
}
