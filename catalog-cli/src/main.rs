mod logs;
mod render;
mod shell;

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use catalog_lib::Catalog;
use catalog_lib::CatalogClient;
use catalog_lib::CatalogConfig;
use catalog_lib::DEFAULT_BASE_URL;
use catalog_lib::api::query::FilterSet;
use catalog_lib::error::ApiError;
use catalog_lib::model::Field;
use catalog_lib::view::CatalogState;
use catalog_lib::view::Event;
use catalog_lib::view::LoadFailure;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use simplelog::LevelFilter;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::logs::LogDir;
use crate::shell::Command;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to set up logging: {0}")]
    Logger(String),
}

/// Browse the character catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
struct Cli {
    /// Root of the character API.
    #[arg(long, env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, env = "CATALOG_LOG", default_value = "info", global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print one page of characters.
    List(ListArgs),
    /// Print the values offered for the status, species and gender filters.
    Options,
    /// Browse interactively (the default).
    Shell,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page: 10, 20, 50 or 100.
    #[arg(long)]
    page_size: Option<usize>,

    /// Sort the page by name, status, species or gender.
    #[arg(long)]
    sort: Option<Field>,

    #[arg(long, requires = "sort")]
    desc: bool,

    /// Expand the row with this id.
    #[arg(long)]
    select: Option<u32>,
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    species: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    gender: Option<String>,
}

impl FilterArgs {
    fn into_filters(self) -> FilterSet {
        let mut filters = FilterSet::new();
        for (field, value) in [
            (Field::Name, self.name),
            (Field::Status, self.status),
            (Field::Species, self.species),
            (Field::Type, self.kind),
            (Field::Gender, self.gender),
        ] {
            if let Some(value) = value {
                filters.set(field, value);
            }
        }
        filters
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match LogDir::locate().init_logger(cli.log_level) {
        Ok(path) => log::info!("logging to {}", path.display()),
        Err(e) => eprintln!("warning: {e}"),
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config = CatalogConfig::default().with_base_url(cli.base_url);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = CatalogClient::from_config(&config)?;
    log::info!("using {}", client.endpoint());

    match cli.command.unwrap_or(Cmd::Shell) {
        Cmd::List(args) => list(client, config, args).await,
        Cmd::Options => {
            let mut catalog = Catalog::new(client, config);
            catalog.load_filter_options().await;
            print!("{}", render::options(&option_lists(&catalog)));
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Shell => interactive(client, config).await,
    }
}

/// Replays the flags as events. Filters and page size share one fetch; a page
/// other than the first is fetched once the totals are known.
async fn list(client: CatalogClient, config: CatalogConfig, args: ListArgs) -> Result<ExitCode, CliError> {
    let mut state = CatalogState::new(config);

    let mut events = vec![Event::SubmitFilters(args.filters.into_filters())];
    if let Some(size) = args.page_size {
        if !state.config().is_page_size_option(size) {
            eprintln!(
                "page size must be one of {:?}",
                state.config().page_size_options
            );
            return Ok(ExitCode::FAILURE);
        }
        events.push(Event::ChangePageSize(size));
    }

    let mut ticket = None;
    for event in events {
        ticket = state.handle(event).or(ticket);
    }
    let ticket = ticket.unwrap_or_else(|| state.reload());
    let result = ticket.run(&client).await;
    state.apply(&ticket, result);

    if args.page != 1 && state.failure().is_none() {
        let Some(ticket) = state.handle(Event::ChangePage(args.page)) else {
            eprintln!("page must be between 1 and {}", state.total_pages().max(1));
            return Ok(ExitCode::FAILURE);
        };
        let result = ticket.run(&client).await;
        state.apply(&ticket, result);
    }

    if let Some(field) = args.sort {
        state.handle(Event::ClickSortHeader(field));
        if args.desc {
            state.handle(Event::ClickSortHeader(field));
        }
    }
    if let Some(id) = args.select {
        state.handle(Event::ToggleRow(id));
    }

    print!("{}", render::state(&state));
    Ok(match state.failure() {
        Some(LoadFailure::Upstream(_)) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn interactive(client: CatalogClient, config: CatalogConfig) -> Result<ExitCode, CliError> {
    let mut catalog = Catalog::new(client, config);

    println!("Loading...");
    catalog.initialize().await;
    print!("{}", render::state(catalog.state()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("catalog> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match shell::parse(&line, catalog.state().filters()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let event = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", shell::HELP);
                continue;
            }
            Command::Options => {
                print!("{}", render::options(&option_lists(&catalog)));
                continue;
            }
            Command::Next => Event::ChangePage(catalog.state().page().saturating_add(1)),
            Command::Prev => Event::ChangePage(catalog.state().page().saturating_sub(1)),
            Command::Event(event) => event,
        };

        if catalog.dispatch(event).await.is_none() {
            log::debug!("event handled without a fetch");
        }
        print!("{}", render::state(catalog.state()));
    }

    Ok(ExitCode::SUCCESS)
}

fn option_lists(catalog: &Catalog<CatalogClient>) -> Vec<(Field, Vec<&str>)> {
    Field::DISTINCT
        .into_iter()
        .map(|field| (field, catalog.options(field)))
        .collect()
}
