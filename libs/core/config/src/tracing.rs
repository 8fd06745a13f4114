//! Logging bootstrap shared by every binary in the workspace.

use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre before anything fallible runs in `main`.
/// Later calls are no-ops.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is unset.
///
/// Our own crates log at `info` in production and `debug` locally; sqlx
/// statement logging stays at `warn` in both, since `DB_SQLX_LOGGING`
/// controls it separately.
pub fn default_directives(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "warn,shop_api=info,axum_helpers=info,database=info,domain_users=info,\
         domain_addresses=info,domain_categories=info,domain_products=info,\
         domain_carts=info,domain_orders=info,tower_http=info,sqlx=warn"
    } else {
        "debug,hyper=info,h2=info,sea_orm=info,sqlx=warn,testcontainers=info"
    }
}

/// Install the global subscriber: JSON lines in production, pretty output
/// in development, both with `tracing_error::ErrorLayer` so eyre reports
/// carry span traces. A second call leaves the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let installed = if environment.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .with(tracing_error::ErrorLayer::default())
            .try_init()
    };

    match installed {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing subscriber already set"),
    }
}
