//! Bearer-credential extractor.
//!
//! Handlers that need an authenticated caller take a [`Principal`] argument.
//! The credential is read from `x-auth-token` or `Authorization: Bearer` and
//! resolved through [`AccountsCommand::authenticate`](crate::domain::ports::AccountsCommand).

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Credential, Error, UserId};
use crate::inbound::http::state::HttpState;

/// Header carrying the raw token, as issued by `POST /api/users`.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const BEARER_PREFIX: &str = "bearer ";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(UserId);

impl Principal {
    /// Identifier of the authenticated user.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn token_not_valid() -> Error {
    Error::unauthorized("token is not valid")
}

fn bearer_token(value: &str) -> Option<&str> {
    let prefix = value.get(..BEARER_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| value[BEARER_PREFIX.len()..].trim())
}

fn credential_from_headers(headers: &HeaderMap) -> Result<Credential, Error> {
    let raw = if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
        value.to_str().map_err(|_| token_not_valid())?.trim()
    } else if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value.to_str().map_err(|_| token_not_valid())?;
        bearer_token(value).ok_or_else(token_not_valid)?
    } else {
        ""
    };

    if raw.is_empty() {
        return Err(Error::unauthorized("no token, authorization denied"));
    }
    Ok(Credential::new(raw))
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credential = credential_from_headers(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let credential = credential.inspect_err(|err| {
                debug!(error = %err, "request without usable credential");
            })?;
            let user_id = state.accounts.authenticate(&credential).await?;
            Ok(Principal(user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureAccountsCommand;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;

    async fn call_whoami(request: actix_test::TestRequest) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::default()))
                .route(
                    "/whoami",
                    web::get().to(|principal: Principal| async move {
                        HttpResponse::Ok().body(principal.user_id().to_string())
                    }),
                ),
        )
        .await;
        let response = actix_test::call_service(&app, request.uri("/whoami").to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case(AUTH_TOKEN_HEADER, FixtureAccountsCommand::TOKEN.to_owned())]
    #[case("authorization", format!("Bearer {}", FixtureAccountsCommand::TOKEN))]
    #[case("authorization", format!("bearer  {}", FixtureAccountsCommand::TOKEN))]
    #[actix_web::test]
    async fn resolves_principal_from_either_header(#[case] header: &str, #[case] value: String) {
        let (status, body) =
            call_whoami(actix_test::TestRequest::get().insert_header((header, value))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "123e4567-e89b-12d3-a456-426614174000");
    }

    #[actix_web::test]
    async fn missing_token_is_denied() {
        let (status, body) = call_whoami(actix_test::TestRequest::get()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("no token, authorization denied"));
    }

    #[rstest]
    #[case(AUTH_TOKEN_HEADER, "someone-elses-token")]
    #[case("authorization", "Basic YWRhOnBhc3N3b3Jk")]
    #[actix_web::test]
    async fn unusable_tokens_are_rejected(#[case] header: &str, #[case] value: &str) {
        let (status, body) =
            call_whoami(actix_test::TestRequest::get().insert_header((header, value))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("token is not valid"));
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("BEARER abc ", Some("abc"))]
    #[case("Bearer", None)]
    #[case("Token abc", None)]
    fn bearer_prefix_is_case_insensitive(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(value), expected);
    }
}
