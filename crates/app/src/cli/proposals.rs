use clap::{Args, Subcommand};
use grantboard_app::{
    database::{self, Db},
    domain::proposals::{PgProposalsService, ProposalsService},
    seed,
};

#[derive(Debug, Args)]
pub(crate) struct ProposalsCommand {
    #[command(subcommand)]
    command: ProposalsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProposalsSubcommand {
    /// Replace all proposals with the sample data
    Seed(DatabaseArgs),
    /// Delete every proposal
    Clear(DatabaseArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: ProposalsCommand) -> Result<(), String> {
    match command.command {
        ProposalsSubcommand::Seed(args) => seed_proposals(args).await,
        ProposalsSubcommand::Clear(args) => clear_proposals(args).await,
    }
}

async fn connect(args: &DatabaseArgs) -> Result<PgProposalsService, String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    Ok(PgProposalsService::new(Db::new(pool)))
}

async fn seed_proposals(args: DatabaseArgs) -> Result<(), String> {
    let service = connect(&args).await?;

    let created = seed::seed(&service)
        .await
        .map_err(|error| format!("failed to seed proposals: {error}"))?;

    println!("created {} sample proposals", created.len());

    for (index, proposal) in created.iter().enumerate() {
        println!("{}. {} - {}", index + 1, proposal.title, proposal.status);
    }

    Ok(())
}

async fn clear_proposals(args: DatabaseArgs) -> Result<(), String> {
    let service = connect(&args).await?;

    let removed = service
        .clear_proposals()
        .await
        .map_err(|error| format!("failed to clear proposals: {error}"))?;

    println!("removed {removed} proposals");

    Ok(())
}
