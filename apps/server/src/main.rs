use anyhow::Context;
use quire::domain::config::ApiConfig;
use quire::kernel::config::load_config;
use quire_logger::Logger;
use quire_server::Server;

#[quire_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    Server::builder().config(cfg).build().await?.run().await
}
