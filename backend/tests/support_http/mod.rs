//! Shared helpers for end-to-end service tests.
//!
//! Spawns real listeners on ephemeral ports so the aggregation service talks
//! to its user directory over HTTP.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use url::Url;

use order_aggregation::domain::UserOrdersService;
use order_aggregation::domain::ports::RecordStore;
use order_aggregation::inbound::http::health::HealthState;
use order_aggregation::outbound::seed::SeedRecordStore;
use order_aggregation::outbound::usuarios::HttpUserDirectory;
use order_aggregation::server::{
    AggregationServerConfig, DirectoryServerConfig, create_directory_server,
};

/// A spawned listener and the base URL that reaches it.
pub struct RunningServer {
    pub base_url: Url,
    pub handle: ServerHandle,
}

impl RunningServer {
    /// Stop the listener without draining connections.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn loopback() -> SocketAddr {
    "127.0.0.1:0".parse().expect("literal address")
}

fn base_url_for(addrs: &[SocketAddr], path: &str) -> Url {
    let addr = addrs.first().expect("server bound at least one address");
    Url::parse(&format!("http://{addr}{path}")).expect("valid base URL")
}

/// Start the real user directory with the built-in seed.
pub fn spawn_directory() -> RunningServer {
    let records: Arc<dyn RecordStore> = Arc::new(SeedRecordStore::default());
    let config = DirectoryServerConfig::new(loopback(), records).with_workers(1);
    let bound = create_directory_server(web::Data::new(HealthState::new()), config)
        .expect("directory server binds");
    let handle = bound.server.handle();
    actix_web::rt::spawn(bound.server);
    RunningServer {
        base_url: base_url_for(&bound.addrs, "/api"),
        handle,
    }
}

/// How a stand-in directory misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum FaultyDirectory {
    /// Answers `200` with a body that is not JSON.
    Garbage,
    /// Answers `500`.
    ServerError,
    /// Answers `200` only after the given delay.
    Slow(Duration),
}

/// Start a stand-in directory that misbehaves in the given way.
pub fn spawn_faulty_directory(fault: FaultyDirectory) -> RunningServer {
    let server = HttpServer::new(move || {
        App::new().route(
            "/api/usuarios",
            web::get().to(move || async move {
                match fault {
                    FaultyDirectory::Garbage => HttpResponse::Ok().body("<html>oops</html>"),
                    FaultyDirectory::ServerError => {
                        HttpResponse::InternalServerError().body("boom")
                    }
                    FaultyDirectory::Slow(delay) => {
                        actix_web::rt::time::sleep(delay).await;
                        HttpResponse::Ok().json(serde_json::json!([]))
                    }
                }
            }),
        )
    })
    .workers(1)
    .bind(loopback())
    .expect("stand-in directory binds");
    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    RunningServer {
        base_url: base_url_for(&addrs, "/api"),
        handle,
    }
}

/// A base URL whose port has no listener.
pub fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind(loopback()).expect("ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    base_url_for(&[addr], "/api")
}

/// Aggregation configuration wired to a directory at `base_url`.
pub fn aggregation_config(base_url: &Url, timeout: Duration) -> AggregationServerConfig {
    let directory = HttpUserDirectory::new(base_url, timeout).expect("directory client builds");
    let records: Arc<dyn RecordStore> = Arc::new(SeedRecordStore::default());
    let service = UserOrdersService::new(Arc::new(directory), records);
    AggregationServerConfig::new(loopback(), Arc::new(service))
}
