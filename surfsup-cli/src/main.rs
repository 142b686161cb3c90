//! SurfsUp CLI - climate report and JSON API over the Hawaii weather dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "surfsup",
    version,
    about = "Hawaii climate analysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: surfsup_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    surfsup_cmd::run(cli.command).await
}
