use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

pub fn init(level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_new(level).context("failed to parse log level")?;

    let builder = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_env_filter(env_filter);

    if json {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    }
    .map_err(|err| anyhow::anyhow!("failed to install logger: {}", err))
}
