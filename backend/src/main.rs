//! Service entry-point: resolves a store connection, then serves HTTP.

mod server;

use std::ffi::OsString;

use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ms_app::domain::HealthContext;
use ms_app::domain::connection::{ConnectionResolver, StartupOutcome, StartupSequencer};
use ms_app::outbound::persistence::{DieselConnector, ensure_users_table};
use ms_app::settings::{ServiceSettings, StartupSettings};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::from_env(&DefaultEnv::new())
        .wrap_err("failed to read service settings")?;
    let startup = StartupSettings::load_from_iter([OsString::from("ms-app")])
        .map_err(|err| eyre!("{err}"))
        .wrap_err("failed to load startup settings")?;

    let resolver_policy = startup.resolver_policy();
    let connector = DieselConnector::new(resolver_policy.probe_timeout);
    let sequencer = StartupSequencer::new(
        ConnectionResolver::new(connector, resolver_policy),
        startup.startup_policy(),
    );
    let outcome = sequencer.run(&settings.descriptors()).await;

    let health = HealthContext {
        hostname: settings.hostname.clone(),
        startup_rounds: outcome.rounds(),
    };
    let config = ServerConfig::new(settings.bind_addr(), health);
    let config = match outcome {
        StartupOutcome::Connected {
            handle, descriptor, ..
        } => {
            info!(
                descriptor = %descriptor,
                route = %descriptor.route(),
                "connected to database"
            );
            if let Err(error) = ensure_users_table(&handle).await {
                warn!(%error, "schema initialisation failed; continuing");
            }
            config.with_db_pool(handle)
        }
        StartupOutcome::Degraded { last_error, .. } => {
            let last_error = last_error.map(|err| err.to_string());
            warn!(
                last_error = last_error.as_deref().unwrap_or("none"),
                "serving without a database"
            );
            config
        }
    };

    info!(addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(config).wrap_err("failed to bind HTTP listener")?;
    server.await.wrap_err("HTTP server terminated")?;
    Ok(())
}
