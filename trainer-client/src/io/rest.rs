//! # REST Scheduling Gateway
//!
//! [`ScheduleGateway`] over the scheduling service's JSON HTTP API.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    CancelScheduleResponse, ConflictCheckResponse, CreateScheduleRequest, CreateScheduleResponse,
    CustomerEnrollment, TrainerScheduleResponse,
};
use std::time::Duration;

use super::{ScheduleGateway, TransportError};
use crate::config::ClientConfig;

const SCHEDULES: [&str; 3] = ["api", "pt", "schedules"];

/// HTTP client for the scheduling service
#[derive(Clone)]
pub struct RestScheduleGateway {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RestScheduleGateway {
    /// Create a gateway from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| TransportError::Network(format!("invalid base URL {}: {}", config.api_base_url, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Network(format!("base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn schedules_endpoint(&self, extra: &[&str]) -> Result<Url, TransportError> {
        let segments: Vec<&str> = SCHEDULES.iter().chain(extra).copied().collect();
        self.endpoint(&segments)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a read request; any non-2xx status is a transport failure
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, TransportError> {
        let (status, body) = self.send(builder).await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Send a mutation; a refusal body is returned as a value even on non-2xx
    /// so its message can be classified
    async fn mutate<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, TransportError> {
        let (status, body) = self.send(builder).await?;
        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()));
        }
        refusal_from_body(&body).ok_or(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, String), TransportError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Scheduling service answered {} for {}", status, response.url());
        if status == StatusCode::UNAUTHORIZED {
            warn!("Scheduling service rejected the session token");
            return Err(TransportError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok((status, body))
    }
}

/// Read a non-2xx mutation body as a refusal.
///
/// The body must be a JSON object carrying `success` or `message`; a missing
/// `success` counts as false.
fn refusal_from_body<T: DeserializeOwned>(body: &str) -> Option<T> {
    let mut value: Value = serde_json::from_str(body).ok()?;
    let fields = value.as_object_mut()?;
    if !fields.contains_key("success") && !fields.contains_key("message") {
        return None;
    }
    fields.entry("success").or_insert(Value::Bool(false));
    serde_json::from_value(value).ok()
}

#[async_trait]
impl ScheduleGateway for RestScheduleGateway {
    async fn fetch_trainer_schedule(&self) -> Result<TrainerScheduleResponse, TransportError> {
        let url = self.schedules_endpoint(&["trainer"])?;
        self.fetch(self.client.get(url)).await
    }

    async fn fetch_enrollment_details(&self) -> Result<Vec<CustomerEnrollment>, TransportError> {
        let url = self.endpoint(&["api", "pt", "enrollments"])?;
        self.fetch(self.client.get(url)).await
    }

    async fn check_conflict(
        &self,
        weekdays: &str,
        session_slot_id: &str,
    ) -> Result<ConflictCheckResponse, TransportError> {
        let url = self.schedules_endpoint(&["conflict"])?;
        let builder = self
            .client
            .get(url)
            .query(&[("weekdays", weekdays), ("sessionSlotId", session_slot_id)]);
        self.fetch(builder).await
    }

    async fn create_schedule(
        &self,
        request: &CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, TransportError> {
        let url = self.schedules_endpoint(&[])?;
        self.mutate(self.client.post(url).json(request)).await
    }

    async fn cancel_schedule(&self, slot_id: &str) -> Result<CancelScheduleResponse, TransportError> {
        let url = self.schedules_endpoint(&[slot_id, "cancel"])?;
        self.mutate(self.client.post(url)).await
    }
}
