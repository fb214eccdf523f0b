//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    routing::{any, get},
    Router,
};
use axum_server::Handle;
use clap::Parser;
use state::AppState;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, info, info_span};

use crate::domain::communication::mailer::Mailer;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short = 'p', long = "port", env = "HTTP_PORT", default_value = "3000")]
    pub http_port: u16,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(
        state: AppState<impl Mailer>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.http_port))?;
        listener
            .set_nonblocking(true)
            .context("failed to make listener non-blocking")?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    #[mutants::skip]
    pub async fn run(self) -> anyhow::Result<()> {
        info!(
            "listening on {}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
        );

        let handle = Handle::new();

        tokio::spawn(shutdown_signal(handle.clone()));

        axum_server::from_tcp(self.listener)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await
            .context("server error")?;

        Ok(())
    }
}

/// Create the application's router
pub fn router<M: Mailer>(state: AppState<M>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .route("/", any(handlers::contact::handler::<M>))
        .route(
            "/openapi.json",
            get(open_api::handler).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::panic_handler))
        .layer(trace_layer)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    debug!("shutting down gracefully");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
