use anyhow::{Context, Result};
use serde::Deserialize;

/// Google OAuth client for the authorization-code exchange and the
/// userinfo lookup that backs login.
#[derive(Clone)]
pub struct GoogleClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
}

/// Profile fields returned by the userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl GoogleClient {
    pub fn new(client_id: &str, client_secret: &str, redirect_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_url: redirect_url.to_string(),
        })
    }

    /// Exchange an authorization code for a Google access token.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokenResponse> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .context("Failed to send token request to Google")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google token endpoint returned error: {} - {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Google token response")
    }

    /// Fetch the profile behind a Google access token.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GoogleUserInfo> {
        let response = self
            .http_client
            .get("https://www.googleapis.com/oauth2/v2/userinfo")
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to send userinfo request to Google")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google userinfo endpoint returned error: {} - {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse Google userinfo response")
    }
}
