//! Registration and token endpoints.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::dto::{AuthResponse, RegisterRequest, RegisterResponse, TokenRequest};
use crate::app::{errors, validation, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
}

/// POST /api/auth/register - register a user against an existing role.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<RegisterRequest>,
) -> axum::response::Response {
    if let Err(reasons) = validation::validate_register(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::failure(reasons.join(", "))),
        )
            .into_response();
    }

    match services
        .auth
        .register(&request.email, &request.password, &request.role)
    {
        Ok(_) => (
            StatusCode::OK,
            Json(RegisterResponse::success("User registered successfully")),
        )
            .into_response(),
        Err(e) => errors::register_error_to_response(e),
    }
}

/// POST /api/auth/token - verify credentials and issue a bearer token.
pub async fn token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<TokenRequest>,
) -> axum::response::Response {
    if let Err(reasons) = validation::validate_token(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure(reasons.join(", "))),
        )
            .into_response();
    }

    match services.auth.authenticate(
        &request.email,
        &request.password,
        &request.audience,
        request.duration_minutes,
    ) {
        Ok(issued) => (
            StatusCode::OK,
            Json(AuthResponse::success("Login successful", issued.token)),
        )
            .into_response(),
        Err(e) => errors::authenticate_error_to_response(e),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use gatekey_auth::CredentialStore;

    use crate::app::test_support::{test_app, SECRET};

    #[derive(Debug, Deserialize)]
    struct DecodedClaims {
        unique_name: String,
        roles: Vec<String>,
        aud: String,
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_and_login_round_trip() {
        let (app, _store) = test_app();

        let response = app
            .clone()
            .oneshot(post(
                "/api/auth/register",
                json!({"email": "alice@example.com", "password": "Passw0rd!", "role": "Dev"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["is_success"], json!(true));

        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "alice@example.com",
                    "password": "Passw0rd!",
                    "audience": "test_audience"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["test_audience"]);
        validation.set_issuer(&["test_issuer"]);
        let claims = decode::<DecodedClaims>(
            body["token"].as_str().unwrap(),
            &DecodingKey::from_secret(SECRET),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(claims.unique_name, "alice@example.com");
        assert_eq!(claims.roles, vec!["Dev"]);
        assert_eq!(claims.aud, "test_audience");
    }

    #[tokio::test]
    async fn register_with_malformed_email_is_bad_request() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/register",
                json!({"email": "not-an-email", "password": "Passw0rd!", "role": "Dev"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["is_success"], json!(false));
        assert_eq!(body["message"], json!("A valid email address is required."));
    }

    #[tokio::test]
    async fn register_with_unknown_role_is_bad_request() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/register",
                json!({"email": "a@x.com", "password": "Passw0rd!", "role": "Ghost"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Requested role does not exist"));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "admin@example.com",
                    "password": "wrong",
                    "audience": "test_audience"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Invalid login attempt"));
    }

    #[tokio::test]
    async fn disallowed_audience_is_bad_request() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "admin@example.com",
                    "password": "Adminpass1!",
                    "audience": "bogus"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Invalid audience"));
    }

    #[tokio::test]
    async fn user_without_roles_is_bad_request() {
        let (app, store) = test_app();
        // Created directly against the store: no role bound.
        store
            .create_identity("roleless@example.com", "Passw0rd!")
            .unwrap();

        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "roleless@example.com",
                    "password": "Passw0rd!",
                    "audience": "test_audience"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("User has no roles"));
    }

    #[tokio::test]
    async fn non_positive_duration_is_rejected_before_the_core() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "admin@example.com",
                    "password": "Adminpass1!",
                    "audience": "test_audience",
                    "duration_minutes": 0
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Duration must be greater than 0."));
    }

    #[tokio::test]
    async fn huge_duration_override_is_rejected_not_fatal() {
        let (app, _store) = test_app();
        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "admin@example.com",
                    "password": "Adminpass1!",
                    "audience": "test_audience",
                    "duration_minutes": i64::MAX
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Duration is out of range"));
    }

    #[tokio::test]
    async fn locked_out_account_is_unauthorized_with_lockout_message() {
        let (app, store) = test_app();
        // Drive the account over the store's lockout threshold.
        for _ in 0..5 {
            let _ = store.verify_password("admin@example.com", "wrong");
        }

        let response = app
            .oneshot(post(
                "/api/auth/token",
                json!({
                    "email": "admin@example.com",
                    "password": "Adminpass1!",
                    "audience": "test_audience"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("User account locked out"));
    }
}
