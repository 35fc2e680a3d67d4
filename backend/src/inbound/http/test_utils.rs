//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test::TestRequest, web};

use crate::domain::UserId;
use crate::domain::ports::FixtureAccountsCommand;
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::principal::AUTH_TOKEN_HEADER;
use crate::inbound::http::state::HttpState;

/// Principal that [`FixtureAccountsCommand`] resolves its token to.
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Build the full route table over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .configure(configure)
}

/// Attach the fixture token so the request authenticates as [`fixture_user`].
pub fn authed(request: TestRequest) -> TestRequest {
    request.insert_header((AUTH_TOKEN_HEADER, FixtureAccountsCommand::TOKEN))
}

pub fn fixture_user() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture user id")
}
