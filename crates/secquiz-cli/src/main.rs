//! The secquiz command-line interface: score answers, grade batches and serve the HTTP API.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "secquiz",
    version,
    about = "Security incident quiz scoring engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one response against a catalog scenario
    #[command(group(ArgGroup::new("input").required(true).args(["response", "response_file"])))]
    Analyze {
        /// Catalog id of the scenario
        #[arg(long)]
        scenario: u32,

        /// Response text
        #[arg(long)]
        response: Option<String>,

        /// Read the response from a file
        #[arg(long)]
        response_file: Option<PathBuf>,

        /// Scenario catalog TOML (defaults to the bundled scenarios)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Taxonomy TOML (defaults to the built-in taxonomy)
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the scenarios in a catalog
    Scenarios {
        /// Scenario catalog TOML
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Grade a batch of submissions
    Grade {
        /// Submissions TOML file
        #[arg(long)]
        submissions: PathBuf,

        /// Scenario catalog TOML
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Taxonomy TOML
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "./secquiz-results")]
        output: PathBuf,

        /// Output format: json, markdown, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Compare two grading reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score change (in points) below which a submission counts as unchanged
        #[arg(long, default_value = "1")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a scenario catalog and taxonomy
    Validate {
        /// Scenario catalog TOML
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Taxonomy TOML
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },

    /// Create starter config and example submissions
    Init,

    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "secquiz=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            scenario,
            response,
            response_file,
            catalog,
            taxonomy,
            format,
        } => commands::analyze::execute(scenario, response, response_file, catalog, taxonomy, format),
        Commands::Scenarios { catalog } => commands::scenarios::execute(catalog),
        Commands::Grade {
            submissions,
            catalog,
            taxonomy,
            output,
            format,
        } => commands::grade::execute(submissions, catalog, taxonomy, output, format),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { catalog, taxonomy } => commands::validate::execute(catalog, taxonomy),
        Commands::Init => commands::init::execute(),
        Commands::Serve { host, port, config } => {
            commands::serve::execute(host, port, config).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
