use crate::utils::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::{ready, Ready};

/// Claims carried by the identity provider's JWT.
/// `sub` is the opaque user id that keys the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub aud: String,
    pub iss: String,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "request-board".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "request-board-clients".to_string())
}

/// Verify a bearer token and return its claims
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Get Authorization header
        let auth_header = req.headers().get("Authorization");

        match auth_header {
            Some(header_value) => {
                if let Ok(header_str) = header_value.to_str() {
                    if let Some(token) = header_str.strip_prefix("Bearer ") {
                        match verify_token(token) {
                            Ok(claims) => {
                                req.extensions_mut().insert(claims);

                                let fut = self.service.call(req);
                                return Box::pin(async move {
                                    let res = fut.await?;
                                    Ok(res)
                                });
                            }
                            Err(e) => {
                                log::warn!("🔒 Rejected token: {}", e);
                                return Box::pin(async move {
                                    Err(AppError::Unauthenticated(
                                        "only authenticated users can call this operation"
                                            .to_string(),
                                    )
                                    .into())
                                });
                            }
                        }
                    }
                }

                Box::pin(async move {
                    Err(AppError::Unauthenticated("Invalid token format".to_string()).into())
                })
            }
            None => Box::pin(async move {
                Err(AppError::Unauthenticated("Missing authorization token".to_string()).into())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_claims(exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "uid-1".to_string(),
            email: "a@b.com".to_string(),
            iat: now as usize,
            exp: (now + exp_offset) as usize,
            aud: get_jwt_audience(),
            iss: get_jwt_issuer(),
        }
    }

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let token = sign(&make_claims(3600));
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(&make_claims(-3600));
        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let mut claims = make_claims(3600);
        claims.aud = "someone-else".to_string();
        let token = sign(&claims);
        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not-a-jwt").is_err());
    }
}
