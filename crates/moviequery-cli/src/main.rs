//! moviequery - TMDB movie filter query CLI.

/// Application configuration (TOML).
mod config;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use moviequery_api::tmdb::TmdbClient;
use moviequery_engine::{
    EnrichPolicy, FilterGroup, NameMatch, QueryEngine, SearchOptions, UnknownGenrePolicy,
    ontology,
};

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
    /// Query TMDB movies with AND/OR filter groups and print them as JSON.
    Query(QueryArgs),
    /// Print the provider descriptor as JSON.
    Describe,
}

/// Arguments for the `query` subcommand.
#[derive(clap::Args)]
struct QueryArgs {
    /// Title substring (e.g. "Terminator").
    #[arg(long)]
    name: Option<String>,

    /// Cast member name (e.g. "Arnold Schwarzenegger").
    #[arg(long)]
    cast: Option<String>,

    /// Director name (e.g. "James Cameron").
    #[arg(long)]
    director: Option<String>,

    /// Genre name (e.g. "Action").
    #[arg(long)]
    genre: Option<String>,

    /// Filter group as a JSON object; repeat for OR-combined groups.
    /// Example: '{"name":"Terminator","director":"James Cameron"}'.
    #[arg(long, value_name = "JSON")]
    group: Vec<String>,

    /// Drop movies that fail to enrich instead of failing the query.
    #[arg(long)]
    best_effort: bool,

    /// Director name comparison (overrides config).
    #[arg(long, value_enum)]
    director_match: Option<DirectorMatchArg>,

    /// Behavior when a genre name is unknown (overrides config).
    #[arg(long, value_enum)]
    unknown_genre: Option<UnknownGenreArg>,
}

/// `--director-match` values.
#[derive(Clone, Copy, ValueEnum)]
enum DirectorMatchArg {
    /// Case-sensitive equality.
    Exact,
    /// Equality ignoring case.
    CaseInsensitive,
}

/// `--unknown-genre` values.
#[derive(Clone, Copy, ValueEnum)]
enum UnknownGenreArg {
    /// Produce no results.
    Empty,
    /// Fail the query.
    Error,
}

impl QueryArgs {
    /// Returns whether any single-group flag is set.
    const fn has_single_group_flags(&self) -> bool {
        self.name.is_some()
            || self.cast.is_some()
            || self.director.is_some()
            || self.genre.is_some()
    }

    /// Builds the filter groups from `--group` or the single-group flags.
    ///
    /// # Errors
    ///
    /// Returns an error if both forms are mixed, a `--group` is not valid
    /// JSON, or no filter is given.
    fn filter_groups(&self) -> Result<Vec<FilterGroup>> {
        if !self.group.is_empty() {
            if self.has_single_group_flags() {
                bail!("--group cannot be combined with --name, --cast, --director or --genre");
            }
            return self
                .group
                .iter()
                .map(|raw| {
                    serde_json::from_str::<FilterGroup>(raw)
                        .with_context(|| format!("invalid --group JSON: {raw}"))
                })
                .collect();
        }

        let group = FilterGroup {
            name: self.name.clone(),
            cast: self.cast.clone(),
            director: self.director.clone(),
            genre: self.genre.clone(),
        };
        if group.is_empty() {
            bail!("at least one filter is required (--name, --cast, --director, --genre or --group)");
        }
        Ok(vec![group])
    }

    /// Overlays the command-line policies on the configured ones.
    const fn search_options(&self, configured: SearchOptions) -> SearchOptions {
        let mut options = configured;
        if self.best_effort {
            options.enrich_policy = EnrichPolicy::BestEffort;
        }
        if let Some(m) = self.director_match {
            options.director_match = match m {
                DirectorMatchArg::Exact => NameMatch::Exact,
                DirectorMatchArg::CaseInsensitive => NameMatch::CaseInsensitive,
            };
        }
        if let Some(g) = self.unknown_genre {
            options.unknown_genre = match g {
                UnknownGenreArg::Empty => UnknownGenrePolicy::Empty,
                UnknownGenreArg::Error => UnknownGenrePolicy::Error,
            };
        }
        options
    }
}

/// Builds a `TmdbClient` from the config and the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if no API key is available or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = std::env::var("TMDB_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .or_else(|| config.tmdb.api_key.clone())
        .context("TMDB_API_KEY environment variable or tmdb.api_key in config is required")?;

    let builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    config
        .tmdb
        .apply(builder)?
        .build()
        .context("failed to build TMDB client")
}

/// Runs the `query` subcommand.
///
/// # Errors
///
/// Returns an error if the arguments or config are invalid, the TMDB
/// client fails to build, or the query fails.
#[instrument(skip_all)]
async fn run_query(args: &QueryArgs, dir: Option<&PathBuf>) -> Result<()> {
    let groups = args.filter_groups()?;

    let config_path = resolve_config_path(dir.map(PathBuf::as_path))?;
    let config = AppConfig::load(&config_path)?;
    let options = args.search_options(config.query);
    tracing::debug!(?options, groups = groups.len(), "Query settings");

    let client = build_tmdb_client(&config)?;
    let engine = QueryEngine::new(client, options);

    let movies = engine.execute(&groups).await?;

    let json = serde_json::to_string_pretty(&movies).context("failed to serialize movies")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")?;

    Ok(())
}

/// Prints the provider descriptor.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
fn run_describe() -> Result<()> {
    let json =
        serde_json::to_string_pretty(&ontology()).context("failed to serialize ontology")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")?;
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
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

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
    match cli.command {
        Commands::Query(args) => run_query(&args, cli.dir.as_ref()).await,
        Commands::Describe => run_describe(),
    }
}
