//! Server construction and middleware wiring for both services.

mod config;
mod settings;

pub use config::{AggregationServerConfig, DirectoryServerConfig};
pub use settings::{PedidosSettings, SettingsError, UsuariosSettings};

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{PedidosApiDoc, UsuariosApiDoc};
use crate::inbound::http::error::route_not_found;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::orders::get_user_orders;
use crate::inbound::http::state::{AggregationState, DirectoryState};
use crate::inbound::http::users::list_users;

/// A running server together with the addresses it bound.
///
/// With port `0` in the configuration, `addrs` reports the port the OS chose.
pub struct BoundServer {
    /// Server future; await it to drive the listener.
    pub server: Server,
    /// Socket addresses the listener is bound to.
    pub addrs: Vec<SocketAddr>,
}

/// Install the JSON tracing subscriber filtered by `RUST_LOG`.
///
/// A second installation attempt only logs a warning.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[derive(Clone)]
struct DirectoryDependencies {
    health_state: web::Data<HealthState>,
    state: web::Data<DirectoryState>,
    base_path: String,
}

#[derive(Clone)]
struct AggregationDependencies {
    health_state: web::Data<HealthState>,
    state: web::Data<AggregationState>,
    base_path: String,
}

fn directory_app(
    deps: DirectoryDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let DirectoryDependencies {
        health_state,
        state,
        base_path,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", UsuariosApiDoc::openapi()),
    );

    app.service(web::scope(&base_path).service(list_users))
        .default_service(web::to(route_not_found))
}

fn aggregation_app(
    deps: AggregationDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AggregationDependencies {
        health_state,
        state,
        base_path,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", PedidosApiDoc::openapi()),
    );

    app.service(web::scope(&base_path).service(get_user_orders))
        .default_service(web::to(route_not_found))
}

/// Build the user directory application without binding a socket.
///
/// Used by in-process tests through `actix_web::test::init_service`.
pub fn build_directory_app(
    health_state: web::Data<HealthState>,
    config: &DirectoryServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    directory_app(DirectoryDependencies {
        health_state,
        state: web::Data::new(DirectoryState::new(config.records.clone())),
        base_path: config.base_path.clone(),
    })
}

/// Build the order aggregation application without binding a socket.
///
/// Used by in-process tests through `actix_web::test::init_service`.
pub fn build_aggregation_app(
    health_state: web::Data<HealthState>,
    config: &AggregationServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    aggregation_app(AggregationDependencies {
        health_state,
        state: web::Data::new(AggregationState::new(config.user_orders.clone())),
        base_path: config.base_path.clone(),
    })
}

/// Construct the user directory HTTP server.
///
/// The readiness probe reports ready once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_directory_server(
    health_state: web::Data<HealthState>,
    config: DirectoryServerConfig,
) -> std::io::Result<BoundServer> {
    let DirectoryServerConfig {
        bind_addr,
        base_path,
        records,
        workers,
    } = config;
    let deps = DirectoryDependencies {
        health_state: health_state.clone(),
        state: web::Data::new(DirectoryState::new(records)),
        base_path,
    };
    let listen_path = format!("{}/usuarios", deps.base_path);

    let mut http_server = HttpServer::new(move || directory_app(deps.clone()));
    if let Some(workers) = workers {
        http_server = http_server.workers(workers);
    }
    let http_server = http_server.bind(bind_addr)?;
    let addrs = http_server.addrs();
    let server = http_server.run();

    health_state.mark_ready();
    info!(?addrs, path = %listen_path, "usuarios service listening");
    Ok(BoundServer { server, addrs })
}

/// Construct the order aggregation HTTP server.
///
/// The readiness probe reports ready once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_aggregation_server(
    health_state: web::Data<HealthState>,
    config: AggregationServerConfig,
) -> std::io::Result<BoundServer> {
    let AggregationServerConfig {
        bind_addr,
        base_path,
        user_orders,
        workers,
    } = config;
    let deps = AggregationDependencies {
        health_state: health_state.clone(),
        state: web::Data::new(AggregationState::new(user_orders)),
        base_path,
    };
    let listen_path = format!("{}/pedidos/{{idUsuario}}", deps.base_path);

    let mut http_server = HttpServer::new(move || aggregation_app(deps.clone()));
    if let Some(workers) = workers {
        http_server = http_server.workers(workers);
    }
    let http_server = http_server.bind(bind_addr)?;
    let addrs = http_server.addrs();
    let server = http_server.run();

    health_state.mark_ready();
    info!(?addrs, path = %listen_path, "pedidos service listening");
    Ok(BoundServer { server, addrs })
}

#[cfg(test)]
mod tests {
    //! In-process routing tests for both applications.

    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{MockUserOrdersQuery, RecordStore};
    use crate::domain::{TRACE_ID_HEADER, UserOrders};
    use crate::outbound::seed::SeedRecordStore;

    fn any_addr() -> SocketAddr {
        "127.0.0.1:0".parse().expect("literal address")
    }

    fn directory_config() -> DirectoryServerConfig {
        let records: Arc<dyn RecordStore> = Arc::new(SeedRecordStore::default());
        DirectoryServerConfig::new(any_addr(), records)
    }

    #[rstest]
    #[case("/api/usuarios", StatusCode::OK)]
    #[case("/usuarios", StatusCode::NOT_FOUND)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn directory_routes_resolve(#[case] path: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_directory_app(
            web::Data::new(HealthState::new()),
            &directory_config(),
        ))
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
                .await;

        assert_eq!(response.status(), expected);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn built_app_outlives_its_configuration() {
        let app = {
            let config = directory_config();
            build_directory_app(web::Data::new(HealthState::new()), &config)
        };
        let app = actix_test::init_service(app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/usuarios").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn directory_lists_seed_users_under_custom_prefix() {
        let config = directory_config()
            .with_base_path("/v2/")
            .expect("valid path");
        let app =
            actix_test::init_service(build_directory_app(web::Data::new(HealthState::new()), &config))
                .await;

        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/v2/usuarios").to_request(),
        )
        .await;

        assert_eq!(
            body,
            serde_json::json!([
                {"id": 1, "nombre": "Ana"},
                {"id": 2, "nombre": "Luis"}
            ])
        );
    }

    #[rstest]
    #[case("", "/pedidos/5")]
    #[case("/api", "/api/pedidos/5")]
    #[actix_web::test]
    async fn aggregation_route_honours_base_path(#[case] base_path: &str, #[case] uri: &str) {
        let mut query = MockUserOrdersQuery::new();
        query
            .expect_orders_for_user()
            .times(1)
            .return_once(|_| Ok(UserOrders::UserNotFound));
        let config = AggregationServerConfig::new(any_addr(), Arc::new(query))
            .with_base_path(base_path)
            .expect("valid path");
        let app = actix_test::init_service(build_aggregation_app(
            web::Data::new(HealthState::new()),
            &config,
        ))
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn unknown_aggregation_route_is_a_json_not_found() {
        let config = AggregationServerConfig::new(any_addr(), Arc::new(MockUserOrdersQuery::new()));
        let app = actix_test::init_service(build_aggregation_app(
            web::Data::new(HealthState::new()),
            &config,
        ))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/pedidos").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "not_found");
    }
}
