pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use storefront_core::config::{AppConfig, LogFormat};
use storefront_core::ProductId;
use tracing_subscriber::EnvFilter;

use commands::{CommandResult, GlobalArgs, Session};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront product catalog CLI",
    long_about = "Browse, search, filter, and edit the product catalog of a demo REST store.",
    after_help = "Examples:\n  storefront list --category electronics --page 2\n  storefront show 3\n  storefront --demo browse\n  storefront doctor --json"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List one page of products, optionally searched and filtered")]
    List(commands::list::ListArgs),
    #[command(about = "Show one product, refetching the catalog when it is not cached")]
    Show { id: ProductId },
    #[command(about = "Open a UI path such as `/` or `/product/3`")]
    Open { path: String },
    #[command(about = "List categories in first-seen order")]
    Categories,
    #[command(about = "Create a product through the validated form")]
    Create(commands::create::CreateArgs),
    #[command(about = "Edit a product; unset fields keep their current values")]
    Update(commands::update::UpdateArgs),
    #[command(about = "Delete a product after confirmation")]
    Delete(commands::delete::DeleteArgs),
    #[command(about = "Interactive catalog session over stdin")]
    Browse,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and product API reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.global) {
        eprintln!("logging disabled: {error}");
    }

    let result = dispatch(&cli.global, cli.command);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn dispatch(global: &GlobalArgs, command: Command) -> CommandResult {
    match command {
        Command::Config => return commands::config::run(global),
        Command::Doctor { json } => return commands::doctor::run(global, json),
        _ => {}
    }

    let session = match Session::open(command_name(&command), global) {
        Ok(session) => session,
        Err(result) => return result,
    };

    match command {
        Command::List(args) => commands::list::run(&session, args),
        Command::Show { id } => commands::show::run(&session, id),
        Command::Open { path } => commands::open::run(&session, &path),
        Command::Categories => commands::categories::run(&session),
        Command::Create(args) => commands::create::run(&session, args),
        Command::Update(args) => commands::update::run(&session, args),
        Command::Delete(args) => commands::delete::run(&session, args),
        Command::Browse => commands::browse::run(&session),
        Command::Config | Command::Doctor { .. } => {
            CommandResult::failure("dispatch", "internal", "unreachable command", 5)
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List(_) => "list",
        Command::Show { .. } => "show",
        Command::Open { .. } => "open",
        Command::Categories => "categories",
        Command::Create(_) => "create",
        Command::Update(_) => "update",
        Command::Delete(_) => "delete",
        Command::Browse => "browse",
        Command::Config => "config",
        Command::Doctor { .. } => "doctor",
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the configured level; a config that fails to load falls back to defaults
/// and is reported by the command itself.
fn init_logging(global: &GlobalArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(global.load_options()).unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow::anyhow!(error))
}
