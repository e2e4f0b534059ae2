use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a signed access token. The uuid is the revocable
/// handle: the signature proves authenticity, but authorization additionally
/// requires the uuid to still be present in the token store.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub authorized: bool,
    pub user_id: String,
    pub access_uuid: String,
    pub exp: i64,
}

/// Claims carried by a signed refresh token.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: String,
    pub refresh_uuid: String,
    pub exp: i64,
}

/// A freshly issued token pair with its store handles and expiries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenDetails {
    pub access_token: String,
    pub refresh_token: String,
    pub access_uuid: String,
    pub refresh_uuid: String,
    /// Unix timestamps.
    pub access_expires: i64,
    pub refresh_expires: i64,
}

// Requests for services
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The caller-facing slice of a token pair; the store handles stay internal.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires: i64,
    pub refresh_expires: i64,
}

impl From<TokenDetails> for TokenPairResponse {
    fn from(details: TokenDetails) -> Self {
        Self {
            access_token: details.access_token,
            refresh_token: details.refresh_token,
            access_expires: details.access_expires,
            refresh_expires: details.refresh_expires,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogoutRequest {
    /// When supplied, the matching refresh uuid is revoked together with the
    /// caller's access uuid.
    #[serde(default)]
    pub refresh_token: Option<String>,
}
