//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_recipe_adapters;

use state_builders::{RecipeAdapters, build_http_state};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use recipes_backend::ApiDoc;
use recipes_backend::Trace;
use recipes_backend::inbound::http::health::{HealthState, live, ready};
use recipes_backend::inbound::http::recipes;
use recipes_backend::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    serve_docs: bool,
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
        serve_docs,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(recipes::configure)
        .service(ready)
        .service(live);

    app.configure(move |cfg| {
        if serve_docs {
            cfg.service(
                SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }
    })
}

/// Construct an Actix HTTP server over the prepared recipe adapters.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: binding address and run mode.
/// - `adapters`: store and cache used by every worker.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    adapters: &RecipeAdapters,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(adapters, Arc::new(DefaultClock));
    let serve_docs = config.run_mode.serves_docs();
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            serve_docs,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, run_mode = %config.run_mode, "recipes server listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Tests for application wiring.

    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use recipes_backend::domain::TRACE_ID_HEADER;
    use recipes_backend::settings::RunMode;
    use rstest::rstest;

    use super::*;

    async fn deps(serve_docs: bool) -> AppDependencies {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), RunMode::Release);
        let adapters = build_recipe_adapters(&config)
            .await
            .expect("adapters build");
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&adapters, Arc::new(DefaultClock)),
            serve_docs,
        }
    }

    #[rstest]
    #[case("/recipes", StatusCode::OK)]
    #[case("/health/ready", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[actix_web::test]
    async fn routes_are_mounted(#[case] path: &str, #[case] expected: StatusCode) {
        let app = test::init_service(build_app(deps(false).await)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

        assert_eq!(res.status(), expected);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn openapi_document_follows_run_mode(
        #[case] serve_docs: bool,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(serve_docs).await)).await;

        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), expected);
    }
}
