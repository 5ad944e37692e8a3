// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth: authorization URL, code exchange and token refresh.

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Credentials, TokenResponse};

/// Strava token endpoint.
pub const TOKEN_URL: &str = "https://www.strava.com/oauth/token";
/// Strava consent page.
pub const AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
/// Redirect target. Nothing listens there; the operator copies the URL back.
pub const REDIRECT_URI: &str = "http://localhost/exchange_token";
/// Scopes needed to read private activities and rename them.
pub const SCOPES: &str = "activity:read_all,activity:write";

/// Token grants against the OAuth endpoint.
#[async_trait]
pub trait TokenGrant: Send + Sync {
    /// Consent page URL the operator has to visit.
    fn authorization_url(&self) -> String;

    /// One-time exchange of the code from the consent redirect.
    async fn exchange_authorization_code(&self, code: &str) -> Result<Credentials>;

    /// Trade a refresh token for a new access/refresh pair.
    async fn refresh(&self, refresh_token: &str) -> Result<Credentials>;
}

/// Strava OAuth client.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, client_id: String, client_secret: String) -> Self {
        Self::with_token_url(http, TOKEN_URL, client_id, client_secret)
    }

    pub fn with_token_url(
        http: reqwest::Client,
        token_url: impl Into<String>,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id,
            client_secret,
        }
    }

    /// POST a grant to the token endpoint.
    async fn request_token(&self, grant: &[(&str, &str)]) -> Result<Credentials> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(grant);

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token request failed");
            return Err(AppError::Auth(format!(
                "Token request failed with status {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))?;

        Ok(token.into())
    }
}

#[async_trait]
impl TokenGrant for AuthClient {
    fn authorization_url(&self) -> String {
        authorization_url(&self.client_id)
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<Credentials> {
        let credentials = self
            .request_token(&[("code", code), ("grant_type", "authorization_code")])
            .await?;
        tracing::info!(expires_at = credentials.expires_at, "Authorization code exchanged");
        Ok(credentials)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials> {
        let credentials = self
            .request_token(&[
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        tracing::info!(expires_at = credentials.expires_at, "Access token refreshed");
        Ok(credentials)
    }
}

/// Build the consent page URL for `client_id`.
pub fn authorization_url(client_id: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
        AUTHORIZE_URL,
        urlencoding::encode(client_id),
        REDIRECT_URI,
        SCOPES
    )
}

/// Pull the first `code` query parameter out of the pasted redirect URL.
pub fn extract_code(redirect_url: &str) -> Result<String> {
    let url = Url::parse(redirect_url.trim())
        .map_err(|e| AppError::Auth(format!("Invalid redirect URL: {}", e)))?;

    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::Auth("No authorization code in redirect URL".to_string()))
}
