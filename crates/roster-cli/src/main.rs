use clap::Parser;
use roster_cli::{CliArgs, RosterCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = RosterCli::from_args("roster", &args)?;
    cli.run(args).await?;
    Ok(())
}
