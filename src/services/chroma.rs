//! Razer Chroma REST API client.
//!
//! Registration posts the application description to the SDK server, which
//! answers with a per-session URI. Effects are `PUT` to `<uri>/<device>`,
//! and the session is closed with `DELETE <uri>`. Every call except
//! registration answers with `{"result": <code>}`, where zero means success.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use color_grid::{Bgr, ColorGrid};

use super::{LightingDevice, Session};
use crate::error::DeviceError;
use crate::models::ChromaConfig;

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    sessionid: i64,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct ResultResponse {
    result: i64,
}

/// HTTP client for the local Chroma SDK server
pub struct ChromaClient {
    client: reqwest::Client,
    config: ChromaConfig,
}

impl ChromaClient {
    pub fn new(config: ChromaConfig) -> Result<Self, DeviceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    fn registration_body(&self) -> serde_json::Value {
        json!({
            "title": self.config.title,
            "description": self.config.description,
            "author": {
                "name": self.config.author_name,
                "contact": self.config.author_contact,
            },
            "device_supported": [self.config.device],
            "category": "application",
        })
    }

    fn device_url(&self, session: &Session) -> String {
        format!(
            "{}/{}",
            session.uri.trim_end_matches('/'),
            self.config.device
        )
    }

    async fn put_effect(
        &self,
        session: &Session,
        body: serde_json::Value,
    ) -> Result<(), DeviceError> {
        let url = self.device_url(session);
        tracing::trace!(url = %url, effect = %body["effect"], "Chroma effect");
        let response = self.client.put(&url).json(&body).send().await?;
        check_result(response).await
    }
}

/// Decode `{"result": n}` and map non-zero codes to an error.
async fn check_result(response: reqwest::Response) -> Result<(), DeviceError> {
    let response = response.error_for_status()?;
    let body = response.text().await?;
    let parsed: ResultResponse = serde_json::from_str(&body)
        .map_err(|e| DeviceError::Protocol(format!("{e}: {body}")))?;
    if parsed.result != 0 {
        return Err(DeviceError::Rejected {
            code: parsed.result,
        });
    }
    Ok(())
}

#[async_trait]
impl LightingDevice for ChromaClient {
    async fn register(&self) -> Result<Session, DeviceError> {
        tracing::debug!(url = %self.config.url, "Registering with Chroma SDK");
        let response = self
            .client
            .post(&self.config.url)
            .json(&self.registration_body())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: RegisterResponse = serde_json::from_str(&body)
            .map_err(|e| DeviceError::Protocol(format!("{e}: {body}")))?;

        Ok(Session {
            id: parsed.sessionid,
            uri: parsed.uri,
        })
    }

    async fn apply_grid(&self, session: &Session, grid: &ColorGrid) -> Result<(), DeviceError> {
        self.put_effect(
            session,
            json!({
                "effect": "CHROMA_CUSTOM",
                "param": grid.to_packed_rows(),
            }),
        )
        .await
    }

    async fn apply_static(&self, session: &Session, color: Bgr) -> Result<(), DeviceError> {
        self.put_effect(
            session,
            json!({
                "effect": "CHROMA_STATIC",
                "param": { "color": color.packed() },
            }),
        )
        .await
    }

    async fn unregister(&self, session: Session) -> Result<(), DeviceError> {
        let response = self.client.delete(&session.uri).send().await?;
        check_result(response).await
    }
}
