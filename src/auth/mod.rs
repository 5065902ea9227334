//! Authentication and authorization.
//!
//! Login issues an HS256 JWT carrying the account's role claims. The token is
//! returned in the response body and set as an httpOnly cookie; protected
//! routes read the cookie first and fall back to a bearer header for API
//! clients. Role checks compare the `user_type` claim (plus the pharmacist /
//! admin sub-claims) against what the route demands.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod password;
mod roles;

pub use password::{hash_password, verify_password};
pub use roles::{AdminLevel, PharmacistRole, UserType};

use crate::config::AppConfig;
use crate::errors::ServiceError;

/// Claim structure for issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    pub email: String,
    /// Which role table the subject lives in
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacist_role: Option<PharmacistRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<AdminLevel>,
    /// Unique token id
    pub jti: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Authentication configuration derived from [`AppConfig`].
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub token_expiration_secs: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub cookie_same_site: crate::config::CookieSameSite,
    pub cookie_domain: Option<String>,
}

impl AuthConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            jwt_secret: cfg.jwt_secret.clone(),
            jwt_issuer: cfg.auth_issuer.clone(),
            jwt_audience: cfg.auth_audience.clone(),
            token_expiration_secs: cfg.jwt_expiration as i64,
            cookie_name: cfg.cookie_name.clone(),
            cookie_secure: cfg.cookie_secure,
            cookie_same_site: cfg.cookie_same_site,
            cookie_domain: cfg.cookie_domain.clone(),
        }
    }
}

/// Identity facts needed to mint a token for an account.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub pharmacist_role: Option<PharmacistRole>,
    pub admin_level: Option<AdminLevel>,
}

/// A freshly issued token plus its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and validates JWTs; builds the matching Set-Cookie values.
#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Mint an access token for the given subject.
    pub fn issue_token(&self, subject: &TokenSubject) -> Result<IssuedToken, ServiceError> {
        let now = Utc::now();
        let exp = now + ChronoDuration::seconds(self.config.token_expiration_secs);

        let claims = Claims {
            sub: subject.id.to_string(),
            email: subject.email.clone(),
            user_type: subject.user_type,
            pharmacist_role: subject.pharmacist_role,
            admin_level: subject.admin_level,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::JwtError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.config.token_expiration_secs,
        })
    }

    /// Decode and validate a token, checking signature, expiry, issuer and
    /// audience.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.config.jwt_audience.clone()]);
        validation.set_issuer(&[self.config.jwt_issuer.clone()]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ServiceError::Unauthorized("Token has expired".to_string())
            }
            _ => ServiceError::Unauthorized("Invalid authentication token".to_string()),
        })?;

        Ok(data.claims)
    }

    /// Build the Set-Cookie value carrying an access token.
    pub fn auth_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
            self.config.cookie_name,
            token,
            self.config.cookie_same_site.as_str(),
            self.config.token_expiration_secs
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        if let Some(domain) = &self.config.cookie_domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        cookie
    }

    /// Build the Set-Cookie value that expires the auth cookie.
    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0",
            self.config.cookie_name,
            self.config.cookie_same_site.as_str()
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        if let Some(domain) = &self.config.cookie_domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        cookie
    }
}

/// Authenticated caller, extracted from the auth cookie or a bearer header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub pharmacist_role: Option<PharmacistRole>,
    pub admin_level: Option<AdminLevel>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn is_super_admin(&self) -> bool {
        self.is_admin() && self.admin_level == Some(AdminLevel::Super)
    }

    /// Fail with 403 unless the caller's user type is one of `allowed`.
    pub fn require_any(&self, allowed: &[UserType]) -> Result<(), ServiceError> {
        if allowed.contains(&self.user_type) {
            Ok(())
        } else {
            let required = allowed
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(ServiceError::Forbidden(format!(
                "Access denied. Required roles: {required}"
            )))
        }
    }

    /// Fail with 403 unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), ServiceError> {
        self.require_any(&[UserType::Admin])
    }

    /// Fail with 403 unless the caller is a SUPER admin.
    pub fn require_super_admin(&self) -> Result<(), ServiceError> {
        if self.is_super_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "Access denied. Required admin level: SUPER".to_string(),
            ))
        }
    }

    /// Catalog writes are allowed for admins and lead pharmacists.
    pub fn require_catalog_manager(&self) -> Result<(), ServiceError> {
        match self.user_type {
            UserType::Admin => Ok(()),
            UserType::Pharmacist
                if self.pharmacist_role == Some(PharmacistRole::LeadPharmacist) =>
            {
                Ok(())
            }
            UserType::Pharmacist => Err(ServiceError::Forbidden(
                "Access denied. Required pharmacist roles: LEAD_PHARMACIST".to_string(),
            )),
            _ => Err(ServiceError::Forbidden(
                "Access denied. Required roles: ADMIN, PHARMACIST".to_string(),
            )),
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        let id = Uuid::parse_str(&claims.sub).unwrap_or_else(|_| Uuid::nil());
        Self {
            id,
            email: claims.email,
            user_type: claims.user_type,
            pharmacist_role: claims.pharmacist_role,
            admin_level: claims.admin_level,
        }
    }
}

/// Pull the raw token out of the request: auth cookie first, bearer second.
fn token_from_parts(parts: &Parts, cookie_name: &str) -> Option<String> {
    if let Some(cookie_header) = parts.headers.get(header::COOKIE) {
        if let Ok(cookies) = cookie_header.to_str() {
            for pair in cookies.split(';') {
                if let Some((name, value)) = pair.trim().split_once('=') {
                    if name == cookie_name && !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if let Some(token) = auth_value.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    crate::AppState: axum::extract::FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = crate::AppState::from_ref(state);
        let auth = &app_state.auth;

        let token = token_from_parts(parts, auth.cookie_name()).ok_or_else(|| {
            ServiceError::Unauthorized("No authentication token provided".to_string())
        })?;

        let claims = auth.validate_token(&token)?;
        Ok(CurrentUser::from(claims))
    }
}
