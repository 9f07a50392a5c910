//! 会话令牌校验
//!
//! 登录流程由外部 OAuth 身份提供方完成，回调桥接服务使用共享密钥签发 HS256 会话令牌。
//! 本服务只负责校验令牌并确认邮箱属于机构域名。

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::utils::validate::email_matches_domain;

// 会话令牌 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,          // 身份提供方中的用户标识
    pub email: String,        // 机构邮箱
    pub name: Option<String>, // 显示名称
    pub exp: usize,           // Expiration time (时间戳)
    pub iat: usize,           // Issued at (签发时间)
}

/// 门户内的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Member,
    Admin,
}

/// 通过校验的会话用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: SessionRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidToken(String),
    DomainNotAllowed,
    MissingSecret,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidToken(reason) => write!(f, "Invalid session token: {reason}"),
            SessionError::DomainNotAllowed => {
                write!(f, "Email domain is not allowed to access this portal")
            }
            SessionError::MissingSecret => write!(f, "Session secret is not configured"),
        }
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 校验会话令牌并解析出用户
    pub fn verify_session_token(
        token: &str,
        auth: &AuthConfig,
    ) -> Result<SessionUser, SessionError> {
        if auth.session_secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }

        let decoding_key = DecodingKey::from_secret(auth.session_secret.as_ref());
        let claims = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        if !email_matches_domain(&claims.email, &auth.allowed_email_domain) {
            return Err(SessionError::DomainNotAllowed);
        }

        let is_admin = auth
            .admin_emails
            .iter()
            .any(|admin| admin.trim().eq_ignore_ascii_case(claims.email.trim()));

        Ok(SessionUser {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: if is_admin {
                SessionRole::Admin
            } else {
                SessionRole::Member
            },
        })
    }
}
