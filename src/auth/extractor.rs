use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::models::RoleName;
use crate::state::SharedState;

/// The authenticated caller, attached to a request once token validation
/// succeeds. Role names in the token that are not part of the seeded
/// vocabulary are dropped during extraction and grant nothing.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub account_id: Uuid,
    pub roles: Vec<RoleName>,
}

impl AuthPrincipal {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Authenticated but missing the required role is 403, distinct from
    /// the 401 of a missing or invalid token.
    pub fn require_role(&self, role: RoleName) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("{role} role required")))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_role(RoleName::Admin)
    }

    pub fn require_any_role(&self) -> Result<(), AppError> {
        if self.roles.is_empty() {
            Err(AppError::Forbidden("Role membership required".to_string()))
        } else {
            Ok(())
        }
    }
}

impl FromRequestParts<SharedState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = jwt::decode_token(token, &state.config.token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let roles = claims
            .roles
            .iter()
            .filter_map(|name| name.parse::<RoleName>().ok())
            .collect();

        Ok(AuthPrincipal {
            account_id: claims.sub,
            roles,
        })
    }
}
