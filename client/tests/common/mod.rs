//! Common test utilities for integration tests
//!
//! Each test gets its own mock API server and an in-memory local store.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use nutrilog_client::api::HttpNutritionApi;
use nutrilog_client::config::ApiConfig;
use nutrilog_client::confirm::{AlwaysConfirm, NeverConfirm, OverwriteConfirm};
use nutrilog_client::storage::{LocalStore, MemoryStore, ACTIVE_USER_KEY};
use nutrilog_client::Orchestrator;
use nutrilog_shared::{ClientState, Gender, Goal, UserId, UserProfile};
use serde_json::{json, Value};
use wiremock::MockServer;

pub type TestOrchestrator = Orchestrator<HttpNutritionApi, Arc<MemoryStore>>;

/// Test client wrapper
pub struct TestClient {
    pub server: MockServer,
    pub store: Arc<MemoryStore>,
}

impl TestClient {
    /// Start a mock API with an empty local store
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Start a mock API with a persisted user id
    pub async fn with_stored_user(value: &str) -> Self {
        let client = Self::new().await;
        client.store.set(ACTIVE_USER_KEY, value).unwrap();
        client
    }

    pub fn api(&self) -> HttpNutritionApi {
        HttpNutritionApi::new(&ApiConfig {
            base_url: self.server.uri(),
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    /// Orchestrator that accepts every overwrite and keeps banners up
    pub fn orchestrator(&self) -> TestOrchestrator {
        self.orchestrator_with(Box::new(AlwaysConfirm))
    }

    /// Orchestrator that declines every overwrite
    pub fn declining_orchestrator(&self) -> TestOrchestrator {
        self.orchestrator_with(Box::new(NeverConfirm))
    }

    pub fn orchestrator_with(&self, confirm: Box<dyn OverwriteConfirm>) -> TestOrchestrator {
        Orchestrator::new(self.api(), Arc::clone(&self.store), confirm, None)
    }

    pub fn stored_user(&self) -> Option<String> {
        self.store.get(ACTIVE_USER_KEY).unwrap()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn profile(id: i64, nickname: &str) -> UserProfile {
    UserProfile {
        id: UserId(id),
        nickname: Some(nickname.to_string()),
        height_cm: 170.0,
        weight_kg: 65.0,
        age: 30,
        gender: Gender::Male,
        goal: Goal::Maintain,
    }
}

pub fn profile_json(id: i64, nickname: &str) -> Value {
    serde_json::to_value(profile(id, nickname)).unwrap()
}

pub fn record_json(on: &str, calories: u32) -> Value {
    json!({
        "record_date": on,
        "calories_consumed": calories,
        "protein_g": 110.0,
        "fat_g": 65.0,
        "carbs_g": 240.0,
        "calories_burned_exercise": 200,
        "id": 1,
        "user_id": 7
    })
}

pub fn summary_json(on: &str, balance: f64) -> Value {
    json!({
        "date": on,
        "bmr": 1617.5,
        "recommended_daily_calories": 1941.0,
        "calorie_balance": balance,
        "llm_feedback": "Protein on target."
    })
}

/// State with user 7 active and the given dates recorded
pub fn active_state(today: &str, filled: &[&str]) -> ClientState {
    let mut state = ClientState::new(date(today));
    let user = profile(7, "A");
    state.set_users(vec![user.clone()]);
    state.activate_user(&user);
    state.set_filled_dates(filled.iter().map(|d| date(d)));
    state
}
