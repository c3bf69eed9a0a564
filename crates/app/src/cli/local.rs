use std::path::PathBuf;

use clap::{Args, Subcommand};
use grantboard::{
    themes::Theme,
    view::{Kpis, ProposalFilter, ProposalRow, filter_proposals},
};
use grantboard_app::{
    domain::proposals::ProposalsService,
    local::{LocalPreferences, LocalProposalsService, LocalStorage},
    seed,
};
use jiff::Timestamp;
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct LocalCommand {
    /// Directory holding the local tracker data
    #[arg(long, env = "GRANTBOARD_DATA_DIR", default_value = ".grantboard")]
    dir: PathBuf,

    #[command(subcommand)]
    command: LocalSubcommand,
}

#[derive(Debug, Subcommand)]
enum LocalSubcommand {
    /// Show the proposal table and summary figures
    List(ListArgs),
    /// Show or change the theme
    Theme(ThemeArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only show proposals mentioning this text
    #[arg(long, default_value = "")]
    search: String,

    /// Only show proposals with this status
    #[arg(long, default_value = "")]
    status: String,
}

#[derive(Debug, Args)]
struct ThemeArgs {
    /// Theme to select; prints the current theme when omitted
    name: Option<String>,
}

pub(crate) async fn run(command: LocalCommand) -> Result<(), String> {
    let storage = LocalStorage::open(&command.dir)
        .await
        .map_err(|error| format!("failed to open local storage: {error}"))?;

    match command.command {
        LocalSubcommand::List(args) => list(storage, args).await,
        LocalSubcommand::Theme(args) => theme(storage, args).await,
    }
}

async fn list(storage: LocalStorage, args: ListArgs) -> Result<(), String> {
    let service = LocalProposalsService::open(storage)
        .await
        .map_err(|error| format!("failed to load proposals: {error}"))?;

    if service.snapshot().await.is_empty() {
        seed::seed(&service)
            .await
            .map_err(|error| format!("failed to load sample proposals: {error}"))?;
    }

    let proposals = service
        .list_proposals()
        .await
        .map_err(|error| format!("failed to load proposals: {error}"))?;

    let filter = ProposalFilter::new(args.search, args.status);
    let now = Timestamp::now();

    let mut builder = Builder::default();

    builder.push_record([
        "Title",
        "Principal Investigator",
        "Funding Agency",
        "Amount",
        "Deadline",
        "Status",
    ]);

    for proposal in filter_proposals(&proposals, &filter) {
        let row = ProposalRow::at(proposal, now);
        let deadline = if row.overdue {
            format!("{} (overdue)", row.deadline)
        } else {
            row.deadline
        };

        builder.push_record([
            row.title,
            row.principal_investigator,
            row.funding_agency,
            row.amount,
            deadline,
            row.status_label,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    let kpis = Kpis::from_proposals(&proposals);

    println!("{table}");
    println!(
        "Total: {}  Approved: {}  Pending: {}  Total Funding: {}",
        kpis.total,
        kpis.approved,
        kpis.pending,
        kpis.total_funding_display()
    );

    Ok(())
}

async fn theme(storage: LocalStorage, args: ThemeArgs) -> Result<(), String> {
    let preferences = LocalPreferences::new(storage);

    let Some(name) = args.name else {
        let theme = preferences
            .theme()
            .await
            .map_err(|error| format!("failed to read theme: {error}"))?;

        println!("{theme}");

        return Ok(());
    };

    let theme = name.parse::<Theme>().map_err(|error| {
        let known: Vec<_> = Theme::ALL.iter().map(|theme| theme.as_str()).collect();

        format!("{error}; expected one of {}", known.join(", "))
    })?;

    preferences
        .set_theme(theme)
        .await
        .map_err(|error| format!("failed to save theme: {error}"))?;

    println!("theme set to {theme}");

    Ok(())
}
