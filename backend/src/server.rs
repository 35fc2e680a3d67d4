//! Server construction and adapter wiring.

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::Clock;

use crate::Trace;
use crate::config::ServerSettings;
use crate::domain::{AccountsService, PostsService, ProfilesService};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory_store::InMemoryDocumentStore;
use crate::outbound::token_auth::{TokenAuthProvider, TokenPolicy};

/// Wire the domain services over the in-memory store and token auth adapter.
///
/// The command and query ports of each aggregate share one service so they
/// share its per-document locks.
pub fn build_http_state(clock: Arc<dyn Clock>, policy: TokenPolicy) -> HttpState {
    let store = Arc::new(InMemoryDocumentStore::new());
    let auth = Arc::new(TokenAuthProvider::new(Arc::clone(&clock), policy));

    let accounts = Arc::new(AccountsService::new(
        Arc::clone(&store),
        auth,
        Arc::clone(&clock),
    ));
    let posts = Arc::new(PostsService::new(Arc::clone(&store), Arc::clone(&clock)));
    let profiles = Arc::new(ProfilesService::new(store, clock));

    HttpState {
        accounts,
        posts: posts.clone(),
        posts_query: posts,
        profiles: profiles.clone(),
        profiles_query: profiles,
    }
}

/// Assemble the application with tracing and every route registered.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
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
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
}

/// Construct an Actix HTTP server bound to the configured address.
///
/// # Errors
/// Returns [`std::io::ErrorKind::InvalidInput`] for an unusable token policy
/// and propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Server> {
    let policy = settings
        .token_policy()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let http_state = web::Data::new(build_http_state(clock, policy));
    let server = HttpServer::new(move || build_app(health_state.clone(), http_state.clone()))
        .bind((settings.host(), settings.port()))?
        .run();
    Ok(server)
}
