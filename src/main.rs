use clap::{Parser, Subcommand};
use rta_geoparse::config::Config;
use rta_geoparse::eval::{self, dataset, report};
use rta_geoparse::gazetteer::Gazetteer;
use rta_geoparse::locate::Locator;
use rta_geoparse::network::geojson;
use rta_geoparse::text::{DictionaryAnalyzer, IdentityAnalyzer, Lemmatizer, MorphAnalyzer};
use rta_geoparse::{server, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// rta-geoparse: locate road-accident reports on the map
///
/// Finds the street intersection or metro station a Russian incident text
/// refers to, using a road network exported to GeoJSON.
///
/// Examples:
///   rta-geoparse locate "ДТП на пересечении Невского проспекта и Садовой улицы"
///   rta-geoparse intersect "Невский проспект" "Садовая улица"
///   rta-geoparse eval rta_texts.json
///   rta-geoparse --network spb_drive.geojson serve --port 3000
#[derive(Parser)]
#[command(name = "rta-geoparse", version, about, long_about = None)]
struct Cli {
    /// Config file (TOML). Defaults to <config dir>/rta-geoparse/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Road network (GeoJSON). Overrides the config file.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Lemma dictionary (TSV). Overrides the config file.
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate a single text and print the result as JSON.
    Locate {
        text: String,
    },
    /// List every point where two streets cross.
    Intersect {
        street1: String,
        street2: String,
    },
    /// Score the locator against a labeled dataset.
    Eval {
        /// Dataset path. Defaults to the configured one.
        dataset: Option<PathBuf>,

        /// Print cases and summary as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 3000)]
        port: u16,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rta_geoparse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.network, cli.lexicon);
    let locator = build_locator(&config)?;

    match cli.command {
        Command::Locate { text } => {
            let located = locator.explain(&text);
            println!("{}", serde_json::to_string_pretty(&located)?);
        }
        Command::Intersect { street1, street2 } => {
            let crossing = locator.intersect(&street1, &street2);
            if crossing.points.is_empty() {
                eprintln!("  No intersections found.");
            }
            println!("{}", serde_json::to_string_pretty(&crossing)?);
        }
        Command::Eval { dataset: path, json } => {
            let path = path.unwrap_or_else(|| config.dataset.clone());
            let cases = dataset::load(&path)?;
            let evaluation = eval::evaluate(&locator, &cases);

            for case in &evaluation.cases {
                eprintln!("{}", report::render_case(case));
            }
            eprint!("{}", report::render_summary(&evaluation.summary));

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            }
        }
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::start(&host, port, locator))?;
        }
    }
    Ok(())
}

/// Load the network and lexicon, then build the gazetteer once.
fn build_locator(config: &Config) -> Result<Locator> {
    let analyzer: Arc<dyn MorphAnalyzer> = match &config.lexicon {
        Some(path) => Arc::new(DictionaryAnalyzer::load(path)?),
        None => {
            tracing::warn!("no lexicon configured; word forms are only suffix-stripped");
            Arc::new(IdentityAnalyzer)
        }
    };
    let lemmatizer = Lemmatizer::new(analyzer);
    let network = geojson::load(&config.network)?;
    let gazetteer = Gazetteer::build(&network, &lemmatizer);
    let triggers = config.triggers(&lemmatizer);
    tracing::debug!(streets = ?triggers.streets, metro = ?triggers.metro, "trigger lemmas");
    Ok(Locator::new(Arc::new(gazetteer), lemmatizer).with_triggers(triggers))
}
