//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON bodies and path segments into validated domain
//! values, call a driving port from [`state::HttpState`], and let
//! [`crate::domain::Error`] render failures.

use actix_web::web;

pub mod accounts;
pub mod error;
pub mod health;
pub mod posts;
pub mod principal;
pub mod profiles;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register health probes at the root and the API under `/api`.
///
/// The app must provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use devhub::inbound::http::{configure, health::HealthState, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live).service(
        web::scope("/api")
            .service(accounts::register)
            .service(accounts::login)
            .service(accounts::current_user)
            .configure(posts::configure)
            .configure(profiles::configure),
    );
}
