//! Integration tests for user selection and profile saving

mod common;

use common::{profile, profile_json, TestClient};
use fake::faker::name::en::FirstName;
use fake::Fake;
use nutrilog_shared::{BannerKind, ClientState, Gender, Goal, UserId};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn fill_profile(state: &mut ClientState, nickname: &str) {
    let form = &mut state.profile_form;
    form.nickname = Some(nickname.to_string());
    form.height_cm = Some(170.0);
    form.weight_kg = Some(65.0);
    form.age = Some(30);
    form.gender = Gender::Female;
    form.goal = Goal::LoseFat;
}

#[tokio::test]
async fn test_activate_without_stored_user_only_lists_users() {
    let client = TestClient::new().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json(7, "A")])))
        .expect(1)
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    let state = orchestrator.state();
    assert_eq!(state.users.len(), 1);
    assert_eq!(state.active_user_id(), None);
    assert!(orchestrator.banner().is_none());
}

#[tokio::test]
async fn test_activate_restores_stored_user() {
    let client = TestClient::with_stored_user("7").await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json(7, "A")])))
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(7, "A")))
        .expect(1)
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/daily_records/dates/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["2025-05-12", "2025-05-14"])))
        .expect(1)
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    let state = orchestrator.state();
    assert_eq!(state.active_user_id(), Some(UserId(7)));
    assert_eq!(state.selected_user_id, Some(UserId(7)));
    assert_eq!(state.profile_form.nickname.as_deref(), Some("A"));
    assert_eq!(state.filled_dates.len(), 2);
    assert_eq!(state.calendar_markers[0].dates.len(), 2);
    assert!(!state.loading.user);

    let banner = orchestrator.banner().unwrap();
    assert_eq!(banner.text, "Profile loaded");
    assert_eq!(banner.kind, BannerKind::Success);
}

#[tokio::test]
async fn test_stale_stored_user_is_forgotten() {
    let client = TestClient::with_stored_user("99").await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/99/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"detail":"User not found"}"#),
        )
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/99/daily_records/dates/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    assert_eq!(orchestrator.state().active_user_id(), None);
    assert_eq!(client.stored_user(), None);

    let banner = orchestrator.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.text, r#"Load failed: {"detail":"User not found"}"#);
}

#[tokio::test]
async fn test_unparsable_stored_user_is_discarded() {
    let client = TestClient::with_stored_user("seven").await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    assert_eq!(orchestrator.state().active_user_id(), None);
    assert_eq!(client.stored_user(), None);
}

#[tokio::test]
async fn test_user_list_failure_is_silent() {
    let client = TestClient::new().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    assert!(orchestrator.state().users.is_empty());
    assert!(orchestrator.banner().is_none());
}

#[tokio::test]
async fn test_select_none_resets_everything() {
    let client = TestClient::new().await;
    let mut orchestrator = client
        .orchestrator()
        .with_state(common::active_state("2025-05-14", &["2025-05-14"]));

    orchestrator.select_user(None).await;

    let state = orchestrator.state();
    assert_eq!(state.active_user_id(), None);
    assert_eq!(state.selected_user_id, None);
    assert!(state.profile_form.nickname.is_none());
    assert!(state.profile_form.height_cm.is_none());
    assert!(state.filled_dates.is_empty());
    assert!(state.calendar_markers.is_empty());
    assert!(state.summary.is_empty());
    assert_eq!(state.users.len(), 1);
}

#[tokio::test]
async fn test_create_profile_persists_new_id() {
    let client = TestClient::new().await;
    let nickname: String = FirstName().fake();

    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_partial_json(json!({
            "nickname": nickname,
            "gender": "female",
            "goal": "lose_fat"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(profile_json(7, &nickname)))
        .expect(1)
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json(7, &nickname)])))
        .expect(1)
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/daily_records/dates/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    fill_profile(orchestrator.state_mut(), &nickname);
    orchestrator.save_profile().await;

    let state = orchestrator.state();
    assert_eq!(state.active_user_id(), Some(UserId(7)));
    assert_eq!(state.selected_user_id, Some(UserId(7)));
    assert_eq!(state.users.len(), 1);
    assert!(!state.loading.user);
    assert_eq!(client.stored_user().as_deref(), Some("7"));
    assert_eq!(orchestrator.banner().unwrap().text, "Profile saved");
}

#[tokio::test]
async fn test_update_profile_uses_put() {
    let client = TestClient::new().await;
    let mut updated = profile(7, "B");
    updated.weight_kg = 63.5;

    Mock::given(method("PUT"))
        .and(path("/users/7/"))
        .and(body_partial_json(json!({ "nickname": "B" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&client.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/daily_records/dates/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["2025-05-14"])))
        .mount(&client.server)
        .await;

    let mut orchestrator = client
        .orchestrator()
        .with_state(common::active_state("2025-05-14", &[]));
    orchestrator.state_mut().profile_form.nickname = Some("B".to_string());
    orchestrator.save_profile().await;

    let state = orchestrator.state();
    assert_eq!(state.profile_form.weight_kg, Some(63.5));
    assert_eq!(state.users[0].nickname.as_deref(), Some("B"));
    assert_eq!(state.filled_dates.len(), 1);
    assert_eq!(orchestrator.banner().unwrap().text, "Profile updated");
    assert_eq!(client.stored_user(), None);
}

#[tokio::test]
async fn test_save_failure_shows_server_body() {
    let client = TestClient::new().await;
    let body = r#"{"detail":[{"loc":["body","age"],"msg":"must be positive"}]}"#;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(422).set_body_string(body))
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    fill_profile(orchestrator.state_mut(), "A");
    orchestrator.save_profile().await;

    let banner = orchestrator.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.text, format!("Save failed: {}", body));
    assert_eq!(orchestrator.state().active_user_id(), None);
    assert!(!orchestrator.state().loading.user);
    assert_eq!(client.stored_user(), None);
}

#[tokio::test]
async fn test_invalid_profile_is_not_sent() {
    let client = TestClient::new().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    fill_profile(orchestrator.state_mut(), "A");
    orchestrator.state_mut().profile_form.height_cm = None;
    orchestrator.save_profile().await;

    let banner = orchestrator.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert!(banner.text.starts_with("Save failed:"));
}

#[tokio::test]
async fn test_switching_user_clears_previous_day() {
    let client = TestClient::new().await;
    Mock::given(method("GET"))
        .and(path("/users/8/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(8, "B")))
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/8/daily_records/dates/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&client.server)
        .await;

    let mut orchestrator = client
        .orchestrator()
        .with_state(common::active_state("2025-05-14", &["2025-05-14"]));
    orchestrator.state_mut().record_form.calories_consumed = Some(1800);

    orchestrator.select_user(Some(UserId(8))).await;

    let state = orchestrator.state();
    assert_eq!(state.active_user_id(), Some(UserId(8)));
    assert_eq!(state.profile_form.nickname.as_deref(), Some("B"));
    assert!(state.filled_dates.is_empty());
    assert_eq!(state.record_form.calories_consumed, None);
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status_reason() {
    let client = TestClient::with_stored_user("7").await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&client.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/7/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&client.server)
        .await;

    let mut orchestrator = client.orchestrator();
    orchestrator.activate().await;

    assert_eq!(
        orchestrator.banner().unwrap().text,
        "Load failed: Service Unavailable"
    );
}
