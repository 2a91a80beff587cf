//! Order aggregation service entry-point.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;

use order_aggregation::inbound::http::health::HealthState;
use order_aggregation::server::{
    AggregationServerConfig, PedidosSettings, create_aggregation_server, init_tracing,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = PedidosSettings::load()
        .map_err(|error| io::Error::other(format!("load pedidos settings: {error}")))?;
    let config = AggregationServerConfig::from_settings(&settings)
        .map_err(|error| io::Error::other(format!("configure pedidos service: {error}")))?;

    let health_state = web::Data::new(HealthState::new());
    let bound = create_aggregation_server(health_state, config)?;
    bound.server.await
}
