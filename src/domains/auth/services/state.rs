use anyhow::Result;
use redis::aio::ConnectionManager;

use crate::domains::auth::services::{JwtService, TokenService, UserService};
use crate::shared::clients::GoogleClient;
use crate::shared::config::Config;
use crate::shared::database::{Database, TokenRepository};

/// Auth domain state: the services behind login, token lifecycle, and
/// profile lookup.
#[derive(Clone)]
pub struct AuthState {
    pub user_service: UserService,
    pub token_service: TokenService,
    pub google_client: GoogleClient,
    /// Where the OAuth callback sends the browser after login.
    pub frontend_origin: String,
}

impl AuthState {
    pub fn new(db: Database, redis: ConnectionManager, config: &Config) -> Result<Self> {
        let jwt = JwtService::new(&config.access_secret, &config.refresh_secret);
        let token_repo = TokenRepository::new(redis);

        Ok(Self {
            user_service: UserService::new(db),
            token_service: TokenService::new(
                jwt,
                token_repo,
                config.access_ttl_secs,
                config.refresh_ttl_secs,
            ),
            google_client: GoogleClient::new(
                &config.google_oauth_client_id,
                &config.google_oauth_client_secret,
                &config.google_oauth_redirect_url,
            )?,
            frontend_origin: config.frontend_origin.clone(),
        })
    }
}
