#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Contact form relay server

use anyhow::Result;
use clap::Parser;
use contact_relay::infrastructure::{
    config::TransportConfig,
    email::MailTransport,
    http::{state::AppState, HttpServer, HttpServerConfig},
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// Where and how messages are delivered
    #[clap(flatten)]
    pub transport: TransportConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = MailTransport::from_config(&args.transport)?;

    if args.transport.recipients().is_empty() {
        warn!("MAIL_TO contains no valid recipients, every send will fail");
    }

    info!(?mailer, recipients = args.transport.recipients().len(), "starting contact relay");

    HttpServer::new(AppState::new(args.transport, mailer), args.server)
        .await?
        .run()
        .await
}
