use tracing_subscriber::{EnvFilter, fmt};

use crate::aestrak::tools::error::{Result, ToolError};

/// Installs the global tracing subscriber.
///
/// Log output goes to stderr so stdout stays reserved for the final status
/// line. The filter is read from `RUST_LOG` and defaults to `warn`, e.g.
/// `RUST_LOG=aestrak_tools=debug` to see dropped rows and discovery details.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}
