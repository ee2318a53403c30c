// affiliate-backend/src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::AppState;
use crate::domain::user_model::UserRole;
use crate::error::AppError;
use crate::utils::jwt::AccessTokenClaims;

/// 認証をスキップするパス
///
/// `/track/` はトラッキングリンクを踏んだ一般訪問者が叩くため
/// 認証なしで通す
const SKIP_AUTH_PATHS: &[&str] = &["/login", "/forgot-password", "/reset-password"];
const SKIP_AUTH_PREFIXES: &[&str] = &["/track/"];

/// 認証済みユーザー情報を格納するエクステンション
///
/// Identity Contextが供給する {subject_id, role} をコアはそのまま信頼する
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: UserRole,
    pub claims: AccessTokenClaims,
}

impl AuthenticatedUser {
    pub fn new(user_id: i32, role: UserRole, claims: AccessTokenClaims) -> Self {
        Self {
            user_id,
            role,
            claims,
        }
    }

    /// 管理者かチェック
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn should_skip_auth(path: &str) -> bool {
    SKIP_AUTH_PATHS.contains(&path)
        || SKIP_AUTH_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// JWT認証ミドルウェア
///
/// Bearerトークンを検証し、AuthenticatedUser をリクエスト
/// エクステンションに挿入する
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if should_skip_auth(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = app_state
        .jwt_manager
        .verify_access_token(token)
        .map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let role: UserRole = claims
        .role
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token role".to_string()))?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(user_id, role, claims));

    Ok(next.run(req).await)
}

// --- Axum Extractor ---

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_auth() {
        assert!(should_skip_auth("/login"));
        assert!(should_skip_auth("/forgot-password"));
        assert!(should_skip_auth("/track/some-opaque-token"));
        assert!(!should_skip_auth("/Affiliate/GetReport"));
        assert!(!should_skip_auth("/admin/list_companies"));
    }
}
