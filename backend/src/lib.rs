//! Developer social network backend.
//!
//! Hexagonal layout: [`domain`] holds the aggregates, services, and ports;
//! [`inbound`] and [`outbound`] hold the adapters; [`config`] loads settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
