//! reqwest implementation of the nutrition API

use async_trait::async_trait;
use chrono::NaiveDate;
use nutrilog_shared::{
    DailyRecord, DailyRecordPayload, DailySummary, UserId, UserPayload, UserProfile,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::NutritionApi;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// JSON-over-HTTP client for the nutrition API
#[derive(Clone)]
pub struct HttpNutritionApi {
    client: Client,
    base_url: String,
}

impl HttpNutritionApi {
    /// Create a client for the configured base URL
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "API request");
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send and turn any non-2xx status into `ClientError::Status`
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let text = match response.text().await {
                Ok(text) => Some(text),
                Err(err) => {
                    debug!(status = status.as_u16(), error = %err, "Could not read error body");
                    None
                }
            };
            let body = error_body(status, text);
            debug!(status = status.as_u16(), body = %body, "API request rejected");
            Err(ClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Body of a rejected request, or the status reason when there is none
fn error_body(status: StatusCode, text: Option<String>) -> String {
    match text {
        Some(body) if !body.trim().is_empty() => body,
        _ => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl NutritionApi for HttpNutritionApi {
    async fn list_users(&self) -> ClientResult<Vec<UserProfile>> {
        self.get_json("/users/").await
    }

    async fn get_user(&self, id: UserId) -> ClientResult<UserProfile> {
        self.get_json(&format!("/users/{}/", id)).await
    }

    async fn create_user(&self, payload: &UserPayload) -> ClientResult<UserProfile> {
        self.send_json(Method::POST, "/users/", payload).await
    }

    async fn update_user(&self, id: UserId, payload: &UserPayload) -> ClientResult<UserProfile> {
        self.send_json(Method::PUT, &format!("/users/{}/", id), payload)
            .await
    }

    async fn list_filled_dates(&self, id: UserId) -> ClientResult<Vec<NaiveDate>> {
        self.get_json(&format!("/users/{}/daily_records/dates/", id))
            .await
    }

    async fn get_daily_record(
        &self,
        id: UserId,
        date: NaiveDate,
    ) -> ClientResult<Option<DailyRecord>> {
        match self
            .get_json(&format!("/users/{}/daily_records/{}", id, iso(date)))
            .await
        {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn submit_daily_record(
        &self,
        id: UserId,
        payload: &DailyRecordPayload,
    ) -> ClientResult<()> {
        let path = format!("/users/{}/daily_records/", id);
        self.send(self.request(Method::POST, &path).json(payload))
            .await?;
        Ok(())
    }

    async fn get_daily_summary(&self, id: UserId, date: NaiveDate) -> ClientResult<DailySummary> {
        self.get_json(&format!("/users/{}/daily_summary/{}/", id, iso(date)))
            .await
    }

    async fn list_daily_records(&self, id: UserId) -> ClientResult<Vec<DailyRecord>> {
        self.get_json(&format!("/users/{}/daily_records/", id))
            .await
    }
}
