//! HTTP implementation of the role-fetch boundary.
//!
//! Thin wrapper over the identity service's REST endpoint: it forwards one
//! authenticated GET and reshapes the `{ success, message, data }` envelope
//! into a [`RoleGrant`] or a classified [`FetchError`].

use reqwest::StatusCode;
use serde::Deserialize;

use certforge_authz::Module;
use certforge_core::RoleId;

use crate::fetcher::{FetchError, RoleFetcher, RoleGrant};

/// Reqwest-backed role client.
#[derive(Debug, Clone)]
pub struct HttpRoleClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<RoleGrantDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleGrantDto {
    role_id: RoleId,
    role_name: String,
    #[serde(default)]
    modules: Vec<Module>,
}

impl HttpRoleClient {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
        }
    }

    fn role_url(&self) -> String {
        format!("{}/api/v1/roles/me", self.base_url.trim_end_matches('/'))
    }

    fn unwrap_envelope(envelope: Envelope) -> Result<RoleGrant, FetchError> {
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "role service reported failure".to_string());
            return Err(FetchError::classify(message));
        }

        let data = envelope
            .data
            .ok_or_else(|| FetchError::Service("success envelope without data".to_string()))?;

        Ok(RoleGrant {
            role_id: data.role_id,
            role_name: data.role_name,
            modules: data.modules,
        })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl RoleFetcher for HttpRoleClient {
    async fn fetch_role(&self) -> Result<RoleGrant, FetchError> {
        let url = self.role_url();
        tracing::debug!(%url, "fetching role grant");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthenticated(
                "identity provider returned 401".to_string(),
            ));
        }
        if !response.status().is_success() {
            return Err(FetchError::Service(format!(
                "role service returned {}",
                response.status()
            )));
        }

        let envelope: Envelope = response.json().await?;
        let grant = Self::unwrap_envelope(envelope)?;

        tracing::debug!(
            role = %grant.role_name,
            modules = grant.modules.len(),
            "role grant received"
        );
        Ok(grant)
    }
}
