use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Environment;

/// Text output for `local`, JSON lines otherwise. `RUST_LOG` takes precedence
/// over the environment's default level.
pub fn init(env: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env.default_directive()));

    let builder = fmt().with_env_filter(filter);

    match env {
        Environment::Local => builder.init(),
        Environment::Dev | Environment::Prod => builder.json().init(),
    }
}
