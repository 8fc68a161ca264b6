use anyhow::Context;
use shiok::domain::config::ApiConfig;
use shiok::kernel::config::load_config;
use shiok_logger::LoggerBuilder;
use shiok_server::{Server, runtime};

fn main() -> anyhow::Result<()> {
    // Optional config file path; `server.{toml,yaml,json}` in the working directory otherwise.
    let config_path = std::env::args().nth(1);
    let cfg: ApiConfig =
        load_config(config_path.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = LoggerBuilder::from_config(env!("CARGO_PKG_NAME"), &cfg.log)?.init()?;

    runtime::build()?.block_on(async { Server::builder().config(cfg).build()?.run().await })
}
