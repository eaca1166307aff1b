//! Server construction: the composition root wiring settings, persistence,
//! the product service, and middleware into an Actix server.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
pub(crate) use metrics::build_metrics;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use estoque::Trace;
#[cfg(debug_assertions)]
use estoque::doc::ApiDoc;
use estoque::domain::ports::ProductRepository;
use estoque::inbound::http::health::{HealthState, live, ready};
use estoque::inbound::http::products;
use estoque::inbound::http::state::HttpState;
use estoque::outbound::persistence::{DbPool, DieselProductRepository, InMemoryProductRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the product repository adapter: PostgreSQL when a pool is configured,
/// otherwise an in-memory map.
fn build_product_repository(db_pool: Option<DbPool>) -> Arc<dyn ProductRepository> {
    match db_pool {
        Some(pool) => {
            info!("persisting products in PostgreSQL");
            Arc::new(DieselProductRepository::new(pool))
        }
        None => {
            warn!("no database configured; products are kept in memory");
            Arc::new(InMemoryProductRepository::new())
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(products::scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the health state and configuration.
///
/// Readiness is marked once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let repository = build_product_repository(db_pool);
    let http_state = web::Data::new(HttpState::new(repository));
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(build_product_repository(None))),
        }
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/api/produtos/selecionar")]
    #[actix_web::test]
    async fn app_serves_probes_and_products(#[case] uri: &str) {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(estoque::domain::TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready_after_binding() {
        let health_state = web::Data::new(HealthState::new());
        let config = ServerConfig::new(std::net::SocketAddr::from(([127, 0, 0, 1], 0)));

        let server = create_server(health_state.clone(), config).expect("server binds");

        assert!(health_state.is_ready());
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(false).await;
    }
}
