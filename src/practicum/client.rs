use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Timeouts;
use crate::error::CycleError;

pub const API_URL: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Source of raw homework status responses.
pub trait StatusSource {
    /// Fetch every status change newer than `from_date` (epoch seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

pub struct PracticumClient {
    token: String,
    client: Client,
    endpoint: String,
}

impl PracticumClient {
    /// `endpoint` is [`API_URL`] in production, a mock server in tests.
    pub fn new(
        token: String,
        endpoint: String,
        timeouts: Timeouts,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;
        Ok(Self {
            token,
            client,
            endpoint,
        })
    }
}

impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        debug!(from_date, endpoint = %self.endpoint, "requesting homework statuses");
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                let err = CycleError::from(e);
                error!(error = %err, "homework API request failed");
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "homework API returned non-OK status");
            return Err(CycleError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            let err = CycleError::from(e);
            error!(error = %err, "failed to read homework API body");
            err
        })
    }
}
