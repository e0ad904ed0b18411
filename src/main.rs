use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_notes::cli::{run_changelog_workflow, ChangelogWorkflowArgs};
use release_notes::{config, env, ui, ErrorKind, ReleaseNotesError};

#[derive(clap::Parser)]
#[command(
    name = "release-notes",
    version,
    about = "Generate a changelog of merged PRs and issue activity since the last GitHub release"
)]
struct Args {
    #[arg(help = "Name of the GitHub organization")]
    organization: String,

    #[arg(help = "Name of the GitHub repository")]
    repo_name: String,

    #[arg(
        long = "file-name",
        alias = "file_name",
        help = "Output file name for the changelog [default: body.txt]"
    )]
    file_name: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        let (message, kind, detail) = match err.downcast_ref::<ReleaseNotesError>() {
            Some(e) => (e.to_string(), e.kind(), e.detail().map(str::to_string)),
            None => (format!("{:#}", err), ErrorKind::Config, None),
        };
        ui::display_failure(&message, kind, detail.as_deref());
        std::process::exit(kind.exit_code());
    }
}

fn run(args: Args) -> Result<()> {
    env::load_dotenv_unless_actions();
    let token = env::auth_token()?;

    let config = config::load_config(args.config.as_deref())?;

    let workflow_args = ChangelogWorkflowArgs {
        organization: args.organization,
        repo_name: args.repo_name,
        file_name: args.file_name,
    };

    ui::display_status(&format!(
        "Collecting changes for {}/{}...",
        workflow_args.organization, workflow_args.repo_name
    ));
    let result = run_changelog_workflow(&workflow_args, &config, &token)?;

    ui::display_success(&ui::format_summary(&result.changelog));
    ui::display_success(&format!("Changelog written to {}", result.output_path.display()));
    Ok(())
}
