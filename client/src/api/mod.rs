//! Nutrition API access
//!
//! `NutritionApi` is the seam between the orchestrator and the network.
//! `HttpNutritionApi` talks JSON over HTTP; tests point it at a mock server.

mod http;

pub use http::HttpNutritionApi;

use async_trait::async_trait;
use chrono::NaiveDate;
use nutrilog_shared::{
    DailyRecord, DailyRecordPayload, DailySummary, UserId, UserPayload, UserProfile,
};

use crate::error::ClientResult;

/// Request/response exchanges with the nutrition API
#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// `GET /users/`
    async fn list_users(&self) -> ClientResult<Vec<UserProfile>>;

    /// `GET /users/{id}/`
    async fn get_user(&self, id: UserId) -> ClientResult<UserProfile>;

    /// `POST /users/`
    async fn create_user(&self, payload: &UserPayload) -> ClientResult<UserProfile>;

    /// `PUT /users/{id}/`
    async fn update_user(&self, id: UserId, payload: &UserPayload) -> ClientResult<UserProfile>;

    /// `GET /users/{id}/daily_records/dates/`
    async fn list_filled_dates(&self, id: UserId) -> ClientResult<Vec<NaiveDate>>;

    /// `GET /users/{id}/daily_records/{date}`; `None` when the server has no record
    async fn get_daily_record(
        &self,
        id: UserId,
        date: NaiveDate,
    ) -> ClientResult<Option<DailyRecord>>;

    /// `POST /users/{id}/daily_records/`; creates or overwrites the record for its date
    async fn submit_daily_record(
        &self,
        id: UserId,
        payload: &DailyRecordPayload,
    ) -> ClientResult<()>;

    /// `GET /users/{id}/daily_summary/{date}/`
    async fn get_daily_summary(&self, id: UserId, date: NaiveDate) -> ClientResult<DailySummary>;

    /// `GET /users/{id}/daily_records/`
    async fn list_daily_records(&self, id: UserId) -> ClientResult<Vec<DailyRecord>>;
}
