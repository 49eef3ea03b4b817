use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use ratelens_aggregate::batch::{run_batch, FailurePolicy};
use ratelens_core::{OutputFormat, RatelensConfig};
use ratelens_vader::{Lexicon, VaderAnalyzer};

const CONFIG_FILE: &str = ".ratelens.toml";

#[derive(Parser)]
#[command(
    name = "ratelens",
    version,
    about = "Score the sentiment of collected reviews, one subject per file",
    long_about = "Reads per-subject review files (JSON arrays of records with an \"rComments\"\n\
                   field), joins every comment into one text, and scores it with a\n\
                   VADER-style lexicon analyzer.\n\n\
                   Examples:\n  \
                     ratelens score ada.json mackey.json   Score two subjects\n  \
                     ratelens score 'reviews/*.json'       Score every file matching a glob\n  \
                     ratelens score --keep-going *.json    Skip unreadable files instead of stopping\n  \
                     ratelens init                         Write a default .ratelens.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .ratelens.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Per-label lines then the full score set, per subject (default)\n  \
                         json      Machine-readable JSON report\n  \
                         markdown  GitHub-flavored Markdown table"
    )]
    format: OutputFormat,

    /// Enable verbose logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Score one or more subjects' review files
    #[command(long_about = "Score one or more subjects' review files.\n\n\
        Each identifier names a review file; the subject name is the identifier with\n\
        its .json suffix removed. Identifiers are processed in order and each subject's\n\
        output is complete before the next begins.\n\n\
        Examples:\n  ratelens score ada.json\n  ratelens score --format json 'reviews/*.json'")]
    Score {
        /// Review files (glob patterns are expanded)
        #[arg(required = true)]
        identifiers: Vec<String>,

        /// Continue past missing or malformed files instead of stopping
        #[arg(long)]
        keep_going: bool,

        /// VADER-format lexicon to score with (overrides config)
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Create a default .ratelens.toml configuration file
    #[command(long_about = "Create a default .ratelens.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .ratelens.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

const DEFAULT_CONFIG: &str = r#"# ratelens configuration

[sentiment]
# VADER-format lexicon (token<TAB>mean...). If unset, vader_lexicon.txt is looked
# for in the working directory, then under $NLTK_DATA and ~/nltk_data
# lexicon = "vader_lexicon.txt"

[batch]
# Stop at the first missing or malformed review file
# fail_fast = true
"#;

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!("ratelens v{version}: review sentiment, one subject per file\n");

    println!("Quick start:");
    println!("  ratelens score ada.json         Score one subject's reviews");
    println!("  ratelens init                   Create a .ratelens.toml config file\n");

    println!("Run 'ratelens <command> --help' for details.");
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "warn,ratelens=debug,ratelens_core=debug,ratelens_vader=debug,ratelens_aggregate=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<RatelensConfig> {
    let config = match explicit {
        Some(path) => RatelensConfig::from_file(path)
            .wrap_err(format!("loading {}", path.display()))?,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                RatelensConfig::from_file(default_path)?
            } else {
                RatelensConfig::default()
            }
        }
    };
    Ok(config)
}

fn build_analyzer(explicit: Option<&Path>) -> Result<VaderAnalyzer> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Lexicon::locate(&Lexicon::default_locations())?,
    };
    let lexicon = Lexicon::from_file(&path)
        .wrap_err(format!("loading lexicon {}", path.display()))?;
    Ok(VaderAnalyzer::new(lexicon))
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(format = %cli.format, fail_fast = config.batch.fail_fast, "configuration loaded");

    match cli.command {
        None => print_welcome(),
        Some(Command::Score {
            ref identifiers,
            keep_going,
            ref lexicon,
        }) => {
            let lexicon_path = lexicon.as_deref().or(config.sentiment.lexicon.as_deref());
            let analyzer = build_analyzer(lexicon_path)?;
            tracing::debug!(entries = analyzer.lexicon().len(), "analyzer ready");

            let policy = if keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::from(&config.batch)
            };

            let report = match cli.format {
                OutputFormat::Text => {
                    run_batch(identifiers, &analyzer, policy, &mut std::io::stdout().lock())?
                }
                OutputFormat::Json | OutputFormat::Markdown => {
                    run_batch(identifiers, &analyzer, policy, &mut std::io::sink())?
                }
            };

            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).into_diagnostic()?
                    );
                }
                OutputFormat::Markdown => print!("{}", report.to_markdown()),
                OutputFormat::Text => {
                    for failure in &report.failures {
                        eprintln!("skipped {}: {}", failure.identifier, failure.error);
                    }
                }
            }

            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Some(Command::Init) => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "ratelens", &mut std::io::stdout());
        }
    }

    Ok(())
}
