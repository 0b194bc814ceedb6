use crate::{
    abstract_trait::jwt::JwtServiceTrait, config::JwtSettings, domain::requests::CurrentUser,
    errors::ServiceError, model::role::Role,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expires_in: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            algorithm: settings.algorithm,
            expires_in: Duration::minutes(settings.access_token_expire_minutes),
        }
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, ServiceError> {
        Ok(encode(
            &Header::new(self.algorithm),
            claims,
            &self.encoding_key,
        )?)
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i32, role: Role) -> Result<String, ServiceError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        self.encode_claims(&claims)
    }

    fn verify_token(&self, token: &str) -> Result<CurrentUser, ServiceError> {
        let validation = Validation::new(self.algorithm);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => {
                    warn!("🎫 Rejected token: {e}");
                    ServiceError::InvalidToken
                }
            }
        })?;

        let id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| ServiceError::InvalidToken)?;

        Ok(CurrentUser {
            id,
            role: data.claims.role,
        })
    }
}
