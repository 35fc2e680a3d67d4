//! Registration and authentication handlers.
//!
//! ```text
//! POST /api/users {"name":"Ada","email":"ada@example.com","password":"secret1"}
//! POST /api/auth  {"email":"ada@example.com","password":"secret1"}
//! GET  /api/auth
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Credential, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::Principal;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_login_validation_error, map_user_validation_error, require_field,
};

/// Registration request body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body for `POST /api/auth`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body carrying a freshly issued credential.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: Credential,
}

/// Register a user and return a token for them.
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let name = require_field(name, FieldName::new("name"))?;
    let email = require_field(email, FieldName::new("email"))?;
    let password = require_field(password, FieldName::new("password"))?;
    let registration = Registration::try_from_parts(&name, &email, &password)
        .map_err(map_user_validation_error)?;

    let token = state.accounts.register(registration).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Exchange email and password for a token.
#[post("/auth")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let email = require_field(email, FieldName::new("email"))?;
    let password = require_field(password, FieldName::new("password"))?;
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;

    let token = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Return the authenticated user's own account.
#[get("/auth")]
pub async fn current_user(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Account>> {
    let account = state.accounts.current_user(principal.user_id()).await?;
    Ok(web::Json(account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureAccountsCommand, MockAccountsCommand};
    use crate::domain::{Error, UserId};
    use crate::inbound::http::test_utils::{FIXTURE_USER_ID, authed, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn post_json(state: HttpState, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn register_returns_token() {
        let (status, body) = post_json(
            HttpState::default(),
            "/api/users",
            json!({"name": "Grace", "email": "grace@example.com", "password": "secret1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"token": FixtureAccountsCommand::TOKEN}));
    }

    #[actix_web::test]
    async fn register_existing_email_is_bad_request() {
        let (status, body) = post_json(
            HttpState::default(),
            "/api/users",
            json!({"name": "Ada", "email": "ADA@example.com", "password": "secret1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["message"], "User already exists");
    }

    #[rstest]
    #[case(json!({"email": "a@b.io", "password": "secret1"}), "name", "missing_field")]
    #[case(json!({"name": " ", "email": "a@b.io", "password": "secret1"}), "name", "missing_field")]
    #[case(json!({"name": "A", "email": "nope", "password": "secret1"}), "email", "invalid_email")]
    #[case(
        json!({"name": "A", "email": "a@b.io", "password": "12345"}),
        "password",
        "password_too_short"
    )]
    #[actix_web::test]
    async fn register_rejects_invalid_payloads(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut accounts = MockAccountsCommand::new();
        accounts.expect_register().never();
        let state = HttpState {
            accounts: Arc::new(accounts),
            ..HttpState::default()
        };

        let (status, payload) = post_json(state, "/api/users", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["code"], "invalid_request");
        assert_eq!(payload["details"]["field"], field);
        assert_eq!(payload["details"]["code"], code);
    }

    #[rstest]
    #[case("ada@example.com", "password", StatusCode::OK)]
    #[case("ada@example.com", "wrong", StatusCode::UNAUTHORIZED)]
    #[case("nobody@example.com", "password", StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn login_checks_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: StatusCode,
    ) {
        let (status, body) = post_json(
            HttpState::default(),
            "/api/auth",
            json!({"email": email, "password": password}),
        )
        .await;
        assert_eq!(status, expected);
        if expected == StatusCode::OK {
            assert_eq!(body["token"], FixtureAccountsCommand::TOKEN);
        } else {
            assert_eq!(body["message"], "invalid credentials");
        }
    }

    #[actix_web::test]
    async fn current_user_returns_account_without_hash() {
        let app = actix_test::init_service(test_app(HttpState::default())).await;
        let request = authed(actix_test::TestRequest::get().uri("/api/auth")).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["id"], FIXTURE_USER_ID);
        assert!(body.get("passwordHash").is_none());
        assert!(body.get("createdAt").is_some());
    }

    #[actix_web::test]
    async fn current_user_for_deleted_account_is_not_found() {
        let mut accounts = MockAccountsCommand::new();
        accounts
            .expect_authenticate()
            .times(1)
            .return_once(|_| Ok(UserId::random()));
        accounts
            .expect_current_user()
            .times(1)
            .return_once(|_| Err(Error::not_found("user not found")));
        let state = HttpState {
            accounts: Arc::new(accounts),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/auth")
            .insert_header(("authorization", "Bearer anything"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
