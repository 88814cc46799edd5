//! Datadog CLI - query events, incidents and logs archives from the terminal

use std::error::Error;
use std::sync::Arc;

use api::{ApiClient, CancellationToken, Configuration, Paginated};
use clap::{Parser, Subcommand, ValueEnum};
use datadog_v2::models::{EventsListRequest, EventsQueryFilter, EventsSort, IncidentRelatedObject};
use datadog_v2::{
    EventsApi, GetIncidentOptionalParameters, IncidentsApi, ListEventsOptionalParameters,
    ListIncidentsOptionalParameters, LogsArchivesApi, SearchEventsOptionalParameters,
};
use futures::StreamExt;
use serde::Serialize;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dd")]
#[command(about = "Query the Datadog v2 API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable every unstable operation (events, incidents)
    #[arg(long, global = true)]
    unstable: bool,

    /// Datadog site, e.g. datadoghq.eu [default: DD_SITE or datadoghq.com]
    #[arg(long, global = true, value_name = "SITE")]
    site: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event Management
    #[command(subcommand)]
    Events(EventsCommand),

    /// Incident Management
    #[command(subcommand)]
    Incidents(IncidentsCommand),

    /// Logs archive configuration
    #[command(subcommand)]
    Archives(ArchivesCommand),
}

#[derive(Subcommand)]
enum EventsCommand {
    /// List events matching a query, following every page
    List {
        #[command(flatten)]
        filter: EventFilterArgs,
    },

    /// Search events with a structured query, following every page
    Search {
        #[command(flatten)]
        filter: EventFilterArgs,
    },
}

#[derive(clap::Args)]
struct EventFilterArgs {
    /// Event search query
    #[arg(short, long, value_name = "QUERY")]
    query: Option<String>,

    /// Minimum timestamp (e.g. now-1h)
    #[arg(long, value_name = "FROM")]
    from: Option<String>,

    /// Maximum timestamp (e.g. now)
    #[arg(long, value_name = "TO")]
    to: Option<String>,

    /// Newest events first
    #[arg(long)]
    newest_first: bool,

    /// Events per page [default: 10]
    #[arg(long, value_name = "N")]
    page_size: Option<i32>,

    /// Stop after this many events
    #[arg(long, value_name = "N")]
    max: Option<usize>,
}

impl EventFilterArgs {
    fn sort(&self) -> Option<EventsSort> {
        self.newest_first.then_some(EventsSort::TimestampDescending)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Include {
    Users,
    Attachments,
}

impl From<Include> for IncidentRelatedObject {
    fn from(include: Include) -> Self {
        match include {
            Include::Users => IncidentRelatedObject::Users,
            Include::Attachments => IncidentRelatedObject::Attachments,
        }
    }
}

#[derive(Subcommand)]
enum IncidentsCommand {
    /// List incidents, following every page
    List {
        /// Related objects to include (repeatable or comma-separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        include: Vec<Include>,

        /// Incidents per page [default: 10]
        #[arg(long, value_name = "N")]
        page_size: Option<i64>,

        /// Stop after this many incidents
        #[arg(long, value_name = "N")]
        max: Option<usize>,
    },

    /// Show one incident
    Get {
        #[arg(value_name = "INCIDENT_ID")]
        id: String,

        /// Related objects to include (repeatable or comma-separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        include: Vec<Include>,
    },

    /// Delete an incident
    Delete {
        #[arg(value_name = "INCIDENT_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
enum ArchivesCommand {
    /// List configured archives
    List,

    /// Show one archive
    Get {
        #[arg(value_name = "ARCHIVE_ID")]
        id: String,
    },

    /// Show the order archives are matched in
    Order,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // Default (verbose=0) shows only WARN, which includes unstable-operation notices
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,api=info,datadog_v2=info".to_string(),
            2 => "info,api=debug,datadog_v2=debug".to_string(),
            _ => "debug,api=trace,datadog_v2=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Prints one record per line.
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// A token cancelled on Ctrl-C.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted; stopping pagination");
            on_interrupt.cancel();
        }
    });
    token
}

/// Prints every item of a paginated run, up to `max`.
async fn drain<T: Serialize>(
    stream: Paginated<T>,
    max: Option<usize>,
) -> Result<usize, Box<dyn Error>> {
    let mut stream = stream.take(max.unwrap_or(usize::MAX));
    let mut count = 0;
    while let Some(item) = stream.next().await {
        print_json(&item?)?;
        count += 1;
    }
    Ok(count)
}

fn configuration(cli: &Cli) -> Configuration {
    let mut config = Configuration::from_env();
    if let Some(site) = &cli.site {
        config = config.with_site(site.clone());
    }
    if cli.unstable {
        config.unstable_operations.enable_all();
    }
    config
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = configuration(&cli);
    let client = Arc::new(ApiClient::from_config(&config)?);

    match cli.command {
        Commands::Events(command) => {
            let events = EventsApi::new(client);
            let count = match command {
                EventsCommand::List { filter } => {
                    let params = ListEventsOptionalParameters {
                        filter_query: filter.query.clone(),
                        filter_from: filter.from.clone(),
                        filter_to: filter.to.clone(),
                        sort: filter.sort(),
                        page_cursor: None,
                        page_limit: filter.page_size,
                    };
                    let stream = events.list_events_with_cancellation(params, interrupt_token());
                    drain(stream, filter.max).await?
                }
                EventsCommand::Search { filter } => {
                    let defaults = EventsQueryFilter::default();
                    let query = EventsQueryFilter {
                        query: filter.query.clone().or(defaults.query),
                        from: filter.from.clone().or(defaults.from),
                        to: filter.to.clone().or(defaults.to),
                        ..Default::default()
                    };
                    let mut body = EventsListRequest {
                        filter: Some(query.into()),
                        sort: filter.sort(),
                        ..Default::default()
                    };
                    if let Some(limit) = filter.page_size {
                        body.update_page(|page| page.limit = Some(limit));
                    }
                    let params = SearchEventsOptionalParameters::default().body(body);
                    let stream = events.search_events_with_cancellation(params, interrupt_token());
                    drain(stream, filter.max).await?
                }
            };
            tracing::info!(count, "events printed");
        }

        Commands::Incidents(command) => {
            let incidents = IncidentsApi::new(client);
            match command {
                IncidentsCommand::List {
                    include,
                    page_size,
                    max,
                } => {
                    let params = ListIncidentsOptionalParameters {
                        include: include.into_iter().map(Into::into).collect(),
                        page_size,
                        page_offset: None,
                    };
                    let stream = incidents.list_incidents_with_cancellation(params, interrupt_token());
                    let count = drain(stream, max).await?;
                    tracing::info!(count, "incidents printed");
                }
                IncidentsCommand::Get { id, include } => {
                    let params = GetIncidentOptionalParameters::default()
                        .include(include.into_iter().map(Into::into).collect());
                    print_json(&incidents.get_incident(&id, params).await?)?;
                }
                IncidentsCommand::Delete { id } => {
                    incidents.delete_incident(&id).await?;
                    tracing::info!(incident = %id, "incident deleted");
                }
            }
        }

        Commands::Archives(command) => {
            let archives = LogsArchivesApi::new(client);
            match command {
                ArchivesCommand::List => {
                    let listing = archives.list_logs_archives().await?;
                    match listing.typed().and_then(|l| l.data.as_ref()) {
                        Some(data) => {
                            for archive in data {
                                print_json(archive)?;
                            }
                        }
                        // Print whatever came back when the listing itself did not decode
                        None => print_json(&listing)?,
                    }
                }
                ArchivesCommand::Get { id } => {
                    print_json(&archives.get_logs_archive(&id).await?)?;
                }
                ArchivesCommand::Order => {
                    print_json(&archives.get_logs_archive_order().await?)?;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables (DD_API_KEY, DD_APP_KEY, DD_SITE) from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    tracing::debug!("Datadog CLI starting");

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
