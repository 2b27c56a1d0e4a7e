//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::build_store;

use state_builders::build_http_state;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use mesto::inbound::http::app::build_app;
use mesto::middleware::CallerIdentity;
#[cfg(debug_assertions)]
use mesto::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Construct an Actix HTTP server from the given configuration.
///
/// Debug builds also serve Swagger UI at `/docs`.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let (host, port) = config.bind_addr();
    info!(
        host,
        port,
        store = config.store.name(),
        caller = %config.caller_id,
        "starting HTTP server"
    );

    let ServerConfig {
        bind_addr,
        caller_id,
        store,
    } = config;
    let http_state = web::Data::new(build_http_state(&store));
    let caller = CallerIdentity::new(caller_id);

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone(), caller.clone());

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
