use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domains::auth::models::{AccessClaims, RefreshClaims};
use crate::shared::errors::ServiceError;

/// JWT codec: signs and verifies access/refresh claim sets with distinct
/// secrets. Purely cryptographic; token store bookkeeping lives in
/// `TokenService`.
#[derive(Clone)]
pub struct JwtService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl JwtService {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_ref()),
            access_decoding: DecodingKey::from_secret(access_secret.as_ref()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_ref()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_ref()),
        }
    }

    pub fn sign_access_token(&self, claims: &AccessClaims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.access_encoding)
            .map_err(|err| ServiceError::internal(anyhow!("failed to sign access token: {err}")))
    }

    pub fn sign_refresh_token(&self, claims: &RefreshClaims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.refresh_encoding)
            .map_err(|err| ServiceError::internal(anyhow!("failed to sign refresh token: {err}")))
    }

    /// Signature, algorithm, and expiry check only. Store membership is a
    /// separate check owned by the caller.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, ServiceError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<AccessClaims>(token, &self.access_decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ServiceError::InvalidParameter)
    }

    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, ServiceError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<RefreshClaims>(token, &self.refresh_decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ServiceError::InvalidParameter)
    }
}
