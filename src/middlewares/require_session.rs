/*!
 * 会话认证中间件
 *
 * 登录由外部身份提供方完成，桥接服务签发 HS256 会话令牌。此中间件只负责校验令牌，
 * 确认邮箱属于机构域名，并把 [`SessionUser`] 放入请求扩展供后续处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireSession;
 *
 * App::new()
 *     .app_data(web::Data::new(config.auth.clone()))
 *     .service(
 *         web::scope("/api/v1/subjects")
 *             .wrap(RequireSession)
 *             .route("", web::get().to(list_subjects)),
 *     )
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <SESSION_TOKEN>`
 * 2. 中间件使用 `auth.session_secret` 校验签名与过期时间
 * 3. 邮箱不属于 `auth.allowed_email_domain` 时拒绝访问
 * 4. 校验失败返回 401，域名不符返回 403
 */

use crate::config::AuthConfig;
use crate::models::ErrorCode;
use crate::utils::jwt::{JwtUtils, SessionError, SessionRole, SessionUser};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireSession;

// 辅助函数：提取并校验会话令牌
fn extract_and_verify_session(req: &ServiceRequest) -> Result<SessionUser, SessionError> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SessionError::InvalidToken("Missing or invalid Authorization header".to_string())
        })?;

    let auth = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or(SessionError::MissingSecret)?;

    JwtUtils::verify_session_token(token, auth.get_ref())
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_verify_session(&req) {
                Ok(user) => {
                    debug!("Session verified for {} ({:?})", user.email, user.role);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    let (status, code, message) = match &err {
                        SessionError::DomainNotAllowed => {
                            (StatusCode::FORBIDDEN, ErrorCode::Forbidden, err.to_string())
                        }
                        SessionError::MissingSecret => {
                            error!("Session verification is not configured: {}", err);
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                ErrorCode::InternalServerError,
                                "Authentication is temporarily unavailable".to_string(),
                            )
                        }
                        SessionError::InvalidToken(_) => (
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Unauthorized: Invalid or missing session token".to_string(),
                        ),
                    };
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, &message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取会话信息
impl RequireSession {
    /// 从请求扩展中提取会话用户
    /// 此函数应该在应用了 RequireSession 中间件的路由处理程序中使用
    pub fn extract_session_user(req: &actix_web::HttpRequest) -> Option<SessionUser> {
        req.extensions().get::<SessionUser>().cloned()
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<SessionRole> {
        req.extensions().get::<SessionUser>().map(|user| user.role)
    }

    pub fn is_admin(req: &actix_web::HttpRequest) -> bool {
        Self::extract_user_role(req) == Some(SessionRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middlewares::RequireRole;
    use crate::utils::jwt::SessionClaims;
    use actix_web::{App, HttpRequest, HttpResponse, test};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn auth_config() -> AuthConfig {
        AuthConfig {
            session_secret: "test-secret".to_string(),
            allowed_email_domain: "@university.edu".to_string(),
            admin_emails: vec!["admin@university.edu".to_string()],
        }
    }

    fn token_for(email: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            email: email.to_string(),
            name: None,
            exp: (now + 600) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let user = RequireSession::extract_session_user(&req).unwrap();
        HttpResponse::Ok().body(user.email)
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new().app_data(web::Data::new(auth_config())).service(
                    web::scope("/api")
                        .wrap(RequireSession)
                        .route("/me", web::get().to(whoami))
                        .route(
                            "/admin",
                            web::post()
                                .to(whoami)
                                .wrap(RequireRole::admin()),
                        ),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_session_reaches_handler() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("student@university.edu")),
            ))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"student@university.edu"));
    }

    #[actix_web::test]
    async fn test_foreign_domain_is_forbidden() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("someone@example.com")),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_route_requires_admin_role() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/admin")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("student@university.edu")),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/admin")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("admin@university.edu")),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
