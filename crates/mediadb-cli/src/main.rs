//! mediadb - movie metadata lookup CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mediadb_api::http::ClientBuilder;
use mediadb_api::parser::{NameFormat, parse_movie_name_and_year, strip_video_extension};
use mediadb_api::provider::Provider;
use mediadb_api::{
    LocalMediaApi, MediaType, OmdbClient, Plot, Query, ResponseFormat, TmdbClient,
};
use serde::Serialize;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, ProviderConfig, resolve_config_path};

/// Environment variable holding the OMDb API key.
const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

/// Environment variable holding the TMDB API key.
const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query the OMDb API.
    Omdb(OmdbCommand),
    /// Query the TMDB API.
    Tmdb(TmdbCommand),
    /// Extract title and year from a movie file name.
    Parse(ParseArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Media type accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediaTypeArg {
    /// Movies.
    Movie,
    /// TV series.
    Series,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Movie => Self::Movie,
            MediaTypeArg::Series => Self::Series,
        }
    }
}

/// OMDb plot length.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlotArg {
    /// Short plot.
    Short,
    /// Full plot.
    Full,
}

impl From<PlotArg> for Plot {
    fn from(arg: PlotArg) -> Self {
        match arg {
            PlotArg::Short => Self::Short,
            PlotArg::Full => Self::Full,
        }
    }
}

/// OMDb response format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// JSON body.
    Json,
    /// XML body.
    Xml,
}

impl From<FormatArg> for ResponseFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Xml => Self::Xml,
        }
    }
}

/// File name layout.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum NameFormatArg {
    /// `Title 2005`
    Space,
    /// `Title (2005)`
    Braces,
    /// `Title.2005`
    Dot,
}

impl From<NameFormatArg> for NameFormat {
    fn from(arg: NameFormatArg) -> Self {
        match arg {
            NameFormatArg::Space => Self::Space,
            NameFormatArg::Braces => Self::Braces,
            NameFormatArg::Dot => Self::Dot,
        }
    }
}

/// Provider selector for `config set-key`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// OMDb.
    Omdb,
    /// TMDB.
    Tmdb,
}

/// Lookup arguments shared by `omdb get` and `tmdb get`.
#[derive(clap::Args)]
struct GetArgs {
    /// Title (e.g. "Saw"). Requires --year and --type.
    #[arg(long)]
    title: Option<String>,
    /// Release year (e.g. "2004").
    #[arg(long)]
    year: Option<String>,
    /// Media type.
    #[arg(long = "type", value_enum)]
    media_type: Option<MediaTypeArg>,
    /// IMDB id (e.g. "tt0387564").
    #[arg(long)]
    imdb_id: Option<String>,
}

impl GetArgs {
    /// Builds the lookup query.
    fn to_query(&self) -> Query {
        Query {
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type.map(MediaType::from),
            imdb_id: self.imdb_id.clone(),
            ..Query::default()
        }
    }
}

/// Search arguments shared by `omdb search` and `tmdb search`.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search string (e.g. "saw").
    #[arg(long, required = true)]
    query: String,
    /// Filter by year.
    #[arg(long)]
    year: Option<String>,
    /// Result page (1-based).
    #[arg(long)]
    page: Option<u32>,
}

impl SearchArgs {
    /// Builds the search query.
    fn to_query(&self) -> Query {
        Query {
            query: Some(self.query.clone()),
            year: self.year.clone(),
            page: self.page,
            ..Query::default()
        }
    }
}

/// Arguments for the `omdb` subcommand.
#[derive(clap::Args)]
struct OmdbCommand {
    /// OMDb subcommand to run.
    #[command(subcommand)]
    command: OmdbSubcommands,
}

/// Available OMDb subcommands.
#[derive(Subcommand)]
enum OmdbSubcommands {
    /// Fetch one item by IMDB id, or by title, year and type.
    Get(OmdbGetArgs),
    /// Search by free text.
    Search(OmdbSearchArgs),
}

/// Arguments for the `omdb get` subcommand.
#[derive(clap::Args)]
struct OmdbGetArgs {
    /// Lookup fields.
    #[command(flatten)]
    lookup: GetArgs,
    /// Plot length (default: full).
    #[arg(long, value_enum)]
    plot: Option<PlotArg>,
    /// Response format requested from OMDb (default: json).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

/// Arguments for the `omdb search` subcommand.
#[derive(clap::Args)]
struct OmdbSearchArgs {
    /// Search fields.
    #[command(flatten)]
    search: SearchArgs,
    /// Restrict to one media type.
    #[arg(long = "type", value_enum)]
    media_type: Option<MediaTypeArg>,
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Fetch one item by IMDB id, or by title, year and type.
    Get(GetArgs),
    /// Search movies and TV series by free text.
    Search(SearchArgs),
}

/// Arguments for the `parse` subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// File name (e.g. "Batman Begins (2005).mkv").
    name: String,
    /// File name layout.
    #[arg(long, value_enum, default_value = "braces")]
    format: NameFormatArg,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store an API key in the config file.
    SetKey(SetKeyArgs),
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// Provider the key belongs to.
    #[arg(long, value_enum)]
    provider: ProviderArg,
    /// API key.
    #[arg(long)]
    api_key: String,
}

/// Builds a provider client from the environment and config file.
///
/// The environment variable wins over `api_key` in the config file.
///
/// # Errors
///
/// Returns an error if no API key is available, the configured base URL is
/// invalid, or the client fails to build.
fn build_client<P: Provider>(
    builder: ClientBuilder<P>,
    env_var: &str,
    settings: &ProviderConfig,
) -> Result<P::Client> {
    let api_key = std::env::var(env_var)
        .ok()
        .filter(|k| !k.is_empty())
        .or_else(|| settings.api_key.clone())
        .with_context(|| {
            format!("{env_var} environment variable or `api_key` in config is required")
        })?;

    let mut builder = builder.api_key(api_key);
    if let Some(base_url) = settings.base_url.as_deref() {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid {} base URL: {base_url}", P::NAME))?;
        builder = builder.base_url(url);
    }

    builder
        .build()
        .with_context(|| format!("failed to build {} client", P::NAME))
}

/// Loads the config file for `--dir`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or parsed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds an `OmdbClient` from `OMDB_API_KEY` or the config file.
///
/// # Errors
///
/// Returns an error if no key is configured or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(dir: Option<&PathBuf>) -> Result<OmdbClient> {
    let config = load_config(dir)?;
    build_client(OmdbClient::builder(), OMDB_API_KEY_ENV, &config.omdb)
}

/// Builds a `TmdbClient` from `TMDB_API_KEY` or the config file.
///
/// # Errors
///
/// Returns an error if no key is configured or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config = load_config(dir)?;
    build_client(TmdbClient::builder(), TMDB_API_KEY_ENV, &config.tmdb)
}

/// Logs a value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    tracing::info!("{json}");
    Ok(())
}

/// Runs a `get` lookup against any provider and prints the record.
///
/// # Errors
///
/// Returns an error if the query is incomplete or the API request fails.
#[allow(clippy::future_not_send)]
#[instrument(skip_all)]
async fn run_get<R: Serialize>(
    client: &(impl LocalMediaApi<Record = R> + Sync),
    query: &Query,
    provider: &str,
) -> Result<()> {
    let record = client
        .get(query)
        .await
        .with_context(|| format!("{provider} get request failed"))?;

    match record {
        Some(record) => print_json(&record),
        None => {
            tracing::info!("No match found");
            Ok(())
        }
    }
}

/// Runs a `search` against any provider and prints the page.
///
/// # Errors
///
/// Returns an error if the query is missing or the API request fails.
#[allow(clippy::future_not_send)]
#[instrument(skip_all)]
async fn run_search<R: Serialize>(
    client: &(impl LocalMediaApi<Record = R> + Sync),
    query: &Query,
    provider: &str,
) -> Result<()> {
    let page = client
        .search(query)
        .await
        .with_context(|| format!("{provider} search request failed"))?;

    tracing::info!(
        "Page {}/{} ({} results)",
        page.current_page,
        page.total_pages,
        page.num_found
    );
    print_json(&page.results)
}

/// Runs the `omdb get` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the lookup fails.
async fn run_omdb_get(args: &OmdbGetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let mut query = args.lookup.to_query();
    query.plot = args.plot.map(Plot::from);
    query.format = args.format.map(ResponseFormat::from);
    run_get(&client, &query, "OMDb").await
}

/// Runs the `omdb search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the search fails.
async fn run_omdb_search(args: &OmdbSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let mut query = args.search.to_query();
    query.media_type = args.media_type.map(MediaType::from);
    run_search(&client, &query, "OMDb").await
}

/// Runs the `tmdb get` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the lookup fails.
async fn run_tmdb_get(args: &GetArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;
    run_get(&client, &args.to_query(), "TMDB").await
}

/// Runs the `tmdb search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the search fails.
async fn run_tmdb_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;
    run_search(&client, &args.to_query(), "TMDB").await
}

/// Runs the `parse` subcommand.
///
/// # Errors
///
/// Returns an error if the name does not match the format.
#[instrument(skip_all)]
fn run_parse(args: &ParseArgs) -> Result<()> {
    let name = strip_video_extension(&args.name);
    let parsed = parse_movie_name_and_year(&name, args.format.into())
        .with_context(|| format!("failed to parse {:?}", args.name))?;

    tracing::info!("Title: {}", parsed.title);
    tracing::info!("Year: {}", parsed.year);
    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;

    let (settings, provider) = match args.provider {
        ProviderArg::Omdb => (&mut config.omdb, "OMDb"),
        ProviderArg::Tmdb => (&mut config.tmdb, "TMDB"),
    };
    settings.api_key = Some(args.api_key.clone());

    config.save(&path)?;
    tracing::info!("Saved {provider} API key to {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Omdb(omdb) => match omdb.command {
            OmdbSubcommands::Get(args) => run_omdb_get(&args, dir).await,
            OmdbSubcommands::Search(args) => run_omdb_search(&args, dir).await,
        },
        Commands::Tmdb(tmdb) => match tmdb.command {
            TmdbSubcommands::Get(args) => run_tmdb_get(&args, dir).await,
            TmdbSubcommands::Search(args) => run_tmdb_search(&args, dir).await,
        },
        Commands::Parse(args) => run_parse(&args),
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::SetKey(args) => run_config_set_key(&args, dir),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicU32, Ordering};

    use mediadb_api::{MediaError, MediaRecord, SearchResult};

    use super::*;

    /// Mock API that returns one canned record and counts calls.
    struct MockMediaApi {
        record: Option<MediaRecord>,
        call_count: AtomicU32,
    }

    impl MockMediaApi {
        fn new(record: Option<MediaRecord>) -> Self {
            Self {
                record,
                call_count: AtomicU32::new(0),
            }
        }
    }

    impl LocalMediaApi for MockMediaApi {
        type Record = MediaRecord;

        async fn get(&self, query: &Query) -> mediadb_api::Result<Option<MediaRecord>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            query.ensure_identifiable()?;
            Ok(self.record.clone())
        }

        async fn search(&self, query: &Query) -> mediadb_api::Result<SearchResult<MediaRecord>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            query.ensure_searchable()?;
            Ok(SearchResult {
                current_page: 1,
                total_pages: 1,
                num_found: 1,
                results: self.record.clone().into_iter().collect(),
            })
        }

        async fn get_by_title_and_year(
            &self,
            title: &str,
            year: &str,
            media_type: MediaType,
        ) -> mediadb_api::Result<Option<MediaRecord>> {
            self.get(&Query::by_title_and_year(title, year, media_type))
                .await
        }

        async fn get_by_imdb_id(&self, imdb_id: &str) -> mediadb_api::Result<Option<MediaRecord>> {
            self.get(&Query::by_imdb_id(imdb_id)).await
        }
    }

    /// Helper to create a minimal `MediaRecord`.
    fn make_record() -> MediaRecord {
        MediaRecord {
            id: 176,
            imdb_id: Some(String::from("tt0387564")),
            title: String::from("Saw"),
            year: String::from("2004"),
            summary: None,
            poster: None,
            genres: Vec::new(),
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_run_get_prints_record() {
        // Arrange
        let mock = MockMediaApi::new(Some(make_record()));

        // Act
        let result = run_get(&mock, &Query::by_imdb_id("tt0387564"), "mock").await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(mock.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_get_without_match_is_ok() {
        // Arrange
        let mock = MockMediaApi::new(None);

        // Act
        let result = run_get(&mock, &Query::by_imdb_id("tt0000001"), "mock").await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_search_propagates_invalid_query() {
        // Arrange
        let mock = MockMediaApi::new(Some(make_record()));

        // Act
        let result = run_search(&mock, &Query::new().title("Saw"), "mock").await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains("mock search request failed"));
        assert!(matches!(
            err.downcast_ref::<MediaError>(),
            Some(MediaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        // Arrange & Act & Assert
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_get_args_to_query() {
        // Arrange
        let args = GetArgs {
            title: Some(String::from("Saw")),
            year: Some(String::from("2004")),
            media_type: Some(MediaTypeArg::Series),
            imdb_id: None,
        };

        // Act
        let query = args.to_query();

        // Assert
        assert_eq!(query.title_value(), Some("Saw"));
        assert_eq!(query.media_type, Some(MediaType::Series));
        assert!(query.ensure_identifiable().is_ok());
    }

    #[test]
    fn test_search_args_to_query() {
        // Arrange
        let args = SearchArgs {
            query: String::from("saw"),
            year: None,
            page: Some(2),
        };

        // Act
        let query = args.to_query();

        // Assert
        assert_eq!(query.query_value(), Some("saw"));
        assert_eq!(query.page, Some(2));
        assert!(query.ensure_searchable().is_ok());
    }

    #[test]
    fn test_build_client_rejects_invalid_base_url() {
        // Arrange
        let settings = ProviderConfig {
            api_key: Some(String::from("from-config")),
            base_url: Some(String::from("not a url")),
        };

        // Act
        let result = build_client(TmdbClient::builder(), "MEDIADB_TEST_UNSET_KEY", &settings);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_build_client_without_key_fails() {
        // Arrange
        let settings = ProviderConfig::default();

        // Act
        let result = build_client(OmdbClient::builder(), "MEDIADB_TEST_UNSET_KEY", &settings);

        // Assert
        let err = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("MEDIADB_TEST_UNSET_KEY"));
    }
}
