//! Minimal demo: list blueprints, then fetch the first one by ID.
//!
//! Reads the API key from `CLOUDCRAFT_API_KEY`.  Set `RUST_LOG=debug` to
//! see the full request/response dumps emitted by the transport layer.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cloudcraft_client::Client;

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = match Client::from_env() {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    let blueprints = match client.blueprints().list() {
        Ok((blueprints, _)) => blueprints,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    info!("found {} blueprints", blueprints.len());
    for bp in &blueprints {
        info!(
            "  {} — {}",
            bp.id.as_deref().unwrap_or("<no id>"),
            bp.name.as_deref().unwrap_or("<unnamed>")
        );
    }

    let Some(id) = blueprints.first().and_then(|bp| bp.id.as_deref()) else {
        info!("no blueprints to fetch");
        return;
    };

    match client.blueprints().get(id) {
        Ok((blueprint, _)) => info!("blueprint {id}: {blueprint:#?}"),
        Err(err) => error!("{err}"),
    }
}
