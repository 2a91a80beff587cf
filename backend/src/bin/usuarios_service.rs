//! User directory service entry-point.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;

use order_aggregation::inbound::http::health::HealthState;
use order_aggregation::server::{
    DirectoryServerConfig, UsuariosSettings, create_directory_server, init_tracing,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = UsuariosSettings::load()
        .map_err(|error| io::Error::other(format!("load usuarios settings: {error}")))?;
    let config = DirectoryServerConfig::from_settings(&settings)
        .map_err(|error| io::Error::other(format!("configure usuarios service: {error}")))?;

    let health_state = web::Data::new(HealthState::new());
    let bound = create_directory_server(health_state, config)?;
    bound.server.await
}
