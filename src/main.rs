//! scanview - entry point.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use scanview::model::{HostRecord, PortRecord};
use scanview::query::QuerySpec;
use scanview::state::{AppState, QueryState};
use scanview::transport::SearchClient;
use scanview::view::TableRow;

/// Which resource table to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceArg {
    /// Scanned hosts.
    Hosts,
    /// Scanned ports.
    Ports,
}

/// TUI dashboard for browsing network scan results
#[derive(Parser, Debug)]
#[command(name = "scanview")]
#[command(version)]
#[command(about = "TUI dashboard for browsing network scan results")]
struct Args {
    /// Resource to browse
    #[arg(value_enum, default_value_t = ResourceArg::Hosts)]
    resource: ResourceArg,

    /// Base URL of the search API
    #[arg(short, long)]
    url: Option<String>,

    /// Module whose search endpoints to query
    #[arg(short, long)]
    module: Option<String>,

    /// Results per page
    #[arg(short, long)]
    page_size: Option<u32>,

    /// Start with this search query applied
    #[arg(short, long)]
    search: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Precedence chain: defaults -> config file -> env vars -> CLI args.
    let config = {
        let config_file = scanview::config::load_config_with_precedence(args.config.clone())?;
        let merged = scanview::config::merge_config(config_file);
        let with_env = scanview::config::apply_env_overrides(merged);
        scanview::config::apply_cli_overrides(
            with_env,
            args.url.clone(),
            args.module.clone(),
            args.page_size,
        )?
    };

    scanview::logging::init(&config.log_file_path)?;
    info!(config = ?config, resource = ?args.resource, "configuration resolved");

    let client = SearchClient::new(&config.api_base_url, &config.module)?;

    match args.resource {
        ResourceArg::Hosts => run_table::<HostRecord>(client, &config, args.search).await?,
        ResourceArg::Ports => run_table::<PortRecord>(client, &config, args.search).await?,
    }

    Ok(())
}

/// Build the screen state for one record type and hand it to the TUI.
async fn run_table<R: TableRow>(
    client: SearchClient,
    config: &scanview::config::ResolvedConfig,
    initial_search: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // page_size was validated by the config chain; a zero here is a bug.
    let spec = QuerySpec::new(config.page_size)
        .ok_or_else(|| scanview::config::ConfigError::InvalidValue("page_size is zero".into()))?;

    let mut app: AppState<R> = AppState::new(QueryState::new(spec), R::FILTER_FIELD, R::SORTABLE);
    if let Some(query) = initial_search {
        app.set_input(query);
    }

    scanview::view::run(client, app).await?;
    Ok(())
}
