use clap::{Parser, Subcommand};

mod local;
mod proposals;

#[derive(Debug, Parser)]
#[command(name = "grantboard-app", about = "Grantboard CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage proposals in the database
    Proposals(proposals::ProposalsCommand),
    /// Work with the local standalone tracker
    Local(local::LocalCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Proposals(command) => proposals::run(command).await,
            Commands::Local(command) => local::run(command).await,
        }
    }
}
