//! Print a service's OpenAPI document as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use utoipa::OpenApi;

use order_aggregation::doc::{PedidosApiDoc, UsuariosApiDoc};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Service {
    Usuarios,
    Pedidos,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the OpenAPI document of one service",
    version
)]
struct CliArgs {
    /// Service whose document is printed.
    #[arg(long, value_enum, default_value_t = Service::Pedidos)]
    service: Service,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let document = match args.service {
        Service::Usuarios => UsuariosApiDoc::openapi(),
        Service::Pedidos => PedidosApiDoc::openapi(),
    };
    let json = document
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?;
    writeln!(io::stdout().lock(), "{json}")
}
