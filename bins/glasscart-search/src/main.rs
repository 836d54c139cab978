//! glasscart-search: query a GlassCart product catalog from the terminal.
//!
//! Runs the same scorer, ranker and presenter the storefront search box uses.

use anyhow::Result;
use clap::{Parser, Subcommand};
use glasscart_cli::output::{format_count, format_duration, Status};
use glasscart_cli::ResultsPrinter;
use glasscart_core::config::Config;
use glasscart_core::error::{exit_codes, Error as CoreError};
use glasscart_search::{
    calculate_relevance, levenshtein_distance, rank, render_html, Catalog, Key, Presenter,
    PresenterOptions, SearchError, SearchSession, SessionAction, SessionUpdate,
};
use glasscart_telemetry::{metrics, TelemetryConfig, Timer};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "glasscart-search")]
#[command(about = "Fuzzy product search for the GlassCart storefront")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to .glasscart.toml lookup)
    #[arg(long, global = true, env = "GLASSCART_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a catalog against a query
    Search {
        /// Search query
        query: String,
        /// JSON array of products
        #[arg(short, long)]
        catalog: PathBuf,
        /// Output the result view as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Output the result view as HTML markup
        #[arg(long)]
        html: bool,
    },

    /// Score a single text against a query
    Score {
        /// Text to search in
        text: String,
        /// Search query
        query: String,
        /// Output the match result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit distance between two strings
    Distance {
        a: String,
        b: String,
    },

    /// Print the full search page link for a query
    Open {
        /// Search query
        query: String,
    },

    /// Search as you type: each stdin line replaces the input value
    ///
    /// A line starting with `!` submits to the full search page and a lone
    /// `.` closes the session.
    Watch {
        /// JSON array of products
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    glasscart_telemetry::init_with_config(TelemetryConfig::for_level(
        config.schema.logging.level.as_str(),
        cli.verbose,
    ))?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let code = match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<CoreError>() {
            Some(err) => {
                Status::error(&err.to_string());
                err.exit_code()
            }
            None => {
                Status::error(&format!("{:#}", e));
                exit_codes::FAILURE
            }
        },
    };

    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(&metrics().export_json())?);
    }

    std::process::exit(code);
}

fn run(command: Commands, config: &Config) -> Result<i32> {
    match command {
        Commands::Search {
            query,
            catalog,
            json,
            html,
        } => run_search(&query, &catalog, json, html, config),
        Commands::Score { text, query, json } => run_score(&text, &query, json),
        Commands::Distance { a, b } => {
            println!("{}", levenshtein_distance(&a, &b));
            Ok(exit_codes::SUCCESS)
        }
        Commands::Open { query } => run_open(&query, config),
        Commands::Watch { catalog } => run_watch(&catalog, config),
    }
}

fn presenter(config: &Config) -> Presenter {
    let search = &config.schema.search;
    Presenter::new(PresenterOptions {
        max_inline_results: search.max_inline_results,
        search_page: search.search_page.clone(),
        product_page: search.product_page.clone(),
    })
}

fn printer() -> ResultsPrinter {
    ResultsPrinter::new(std::io::stdout().is_terminal())
}

fn load_catalog(path: &Path) -> glasscart_core::Result<Catalog> {
    glasscart_telemetry::timed_span!("catalog.load_ms", path = %path.display());

    if !path.exists() {
        return Err(CoreError::catalog_not_found(path));
    }

    let catalog = Catalog::from_path(path).map_err(|e| match e {
        SearchError::Catalog(source) => CoreError::catalog_parse(path).with_source(source),
        SearchError::Io(source) => CoreError::from(source)
            .with_context(format!("Reading catalog {}", path.display())),
    })?;

    metrics().gauge("catalog.products", catalog.len() as u64);
    tracing::debug!(
        path = %path.display(),
        products = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

fn record_query(total: usize) {
    metrics().increment("search.queries");
    if total == 0 {
        metrics().increment("search.no_results");
    }
}

fn run_search(query: &str, catalog_path: &Path, json: bool, html: bool, config: &Config) -> Result<i32> {
    let catalog = load_catalog(catalog_path)?;
    let query = query.trim();
    if query.is_empty() {
        tracing::debug!("Empty query, nothing to search");
        return Ok(exit_codes::SUCCESS);
    }

    let timer = Timer::start("search.rank_ms");
    let results = rank(catalog.products(), query);
    let elapsed = timer.stop();
    record_query(results.len());

    let view = presenter(config).present(&results, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if html {
        println!("{}", render_html(&view));
    } else {
        printer().print(&view);
        Status::info(&format!(
            "{} in {} across {}",
            format_count(view.total(), "match", "matches"),
            format_duration(elapsed),
            format_count(catalog.len(), "product", "products"),
        ));
    }

    Ok(exit_codes::SUCCESS)
}

fn run_score(text: &str, query: &str, json: bool) -> Result<i32> {
    let result = calculate_relevance(text, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("matched: {}", result.matched);
        println!("tier:    {}", result.tier);
        println!("score:   {}", result.score);
    }

    Ok(exit_codes::SUCCESS)
}

fn run_open(query: &str, config: &Config) -> Result<i32> {
    let mut session = SearchSession::new(&[], presenter(config), config.debounce());
    match session.on_key(Key::Enter, query) {
        Some(SessionAction::Navigate(url)) => {
            println!("{}", url);
            Ok(exit_codes::SUCCESS)
        }
        _ => Err(CoreError::validation("Nothing to search for")
            .with_suggestion("Pass a non-empty query")
            .into()),
    }
}

fn run_watch(catalog_path: &Path, config: &Config) -> Result<i32> {
    let catalog = load_catalog(catalog_path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(watch(&catalog, config))
}

async fn watch(catalog: &Catalog, config: &Config) -> Result<i32> {
    let printer = printer();
    let mut session = SearchSession::new(catalog.products(), presenter(config), config.debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current = String::new();

    if std::io::stdin().is_terminal() {
        Status::info("Type to search. Prefix a line with ! to open the full results, . to quit.");
    }

    loop {
        let deadline = session.next_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input closed: flush whatever is still waiting on the debounce.
                    if let Some(due) = session.next_deadline() {
                        if let Some(update) = session.poll(due) {
                            show(&printer, update);
                        }
                    }
                    return Ok(exit_codes::SUCCESS);
                };

                if line == "." {
                    if let Some(SessionAction::Close) = session.on_key(Key::Escape, &current) {
                        tracing::debug!("Search closed");
                    }
                    return Ok(exit_codes::SUCCESS);
                }

                if let Some(submitted) = line.strip_prefix('!') {
                    if !submitted.trim().is_empty() {
                        current = submitted.to_string();
                    }
                    if let Some(SessionAction::Navigate(url)) = session.on_key(Key::Enter, &current) {
                        println!("{}", url);
                    }
                    continue;
                }

                session.on_input(&line, Instant::now());
                current = line;
            }
            _ = wait_until(deadline) => {
                let now = deadline.map_or_else(Instant::now, |due| Instant::now().max(due));
                if let Some(update) = session.poll(now) {
                    show(&printer, update);
                }
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(due) => tokio::time::sleep_until(tokio::time::Instant::from_std(due)).await,
        None => std::future::pending().await,
    }
}

fn show(printer: &ResultsPrinter, update: SessionUpdate) {
    match update {
        SessionUpdate::Clear => println!(),
        SessionUpdate::Render(view) => {
            record_query(view.total());
            printer.print(&view);
        }
    }
}
