use anyhow::{Context, Result};
use clap::Parser;
use node_sign::compat::{BreakingConfig, RuleGeneration};
use node_sign::provider::{ManifestProvider, RegistryProvider, load_pair};
use node_sign::report;
use node_sign::surface::{Compatibility, Surface};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "node-sign")]
#[command(about = "Check plugin node registries for breaking changes and generate semantic fingerprints")]
#[command(version)]
struct Args {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    #[command(about = "Check the PR plugin version for breaking changes against the base version")]
    Check {
        #[arg(help = "Base plugin directory or manifest")]
        base: PathBuf,
        #[arg(help = "PR plugin directory or manifest")]
        pr: PathBuf,
        #[arg(long, help = "Output format", value_enum, default_value = "text")]
        format: OutputFormat,
        #[arg(long, help = "YAML configuration file with a `breaking` section")]
        config: Option<PathBuf>,
        #[arg(long, help = "Return-type rule generation (prefix, strict, refined)")]
        generation: Option<RuleGeneration>,
        #[arg(long, help = "Rules to use (comma-separated)")]
        use_rules: Option<String>,
        #[arg(long, help = "Rules to exclude (comma-separated)")]
        except_rules: Option<String>,
        #[arg(long, help = "Also report inputs newly required by the PR version")]
        flag_added_inputs: bool,
    },
    #[command(about = "Classify two plugin versions as green, yellow or red")]
    Compare {
        #[arg(help = "Base plugin directory or manifest")]
        base: PathBuf,
        #[arg(help = "PR plugin directory or manifest")]
        pr: PathBuf,
    },
    #[command(about = "Generate semantic fingerprint for a plugin's node registry")]
    Fingerprint {
        #[arg(help = "Plugin directory or manifest")]
        path: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let provider = ManifestProvider::new();

    match args.command {
        Commands::Check {
            base,
            pr,
            format,
            config,
            generation,
            use_rules,
            except_rules,
            flag_added_inputs,
        } => {
            // Build configuration: file first, flags override.
            let mut config = match config {
                Some(path) => BreakingConfig::from_yaml_file(&path).with_context(|| {
                    format!("Failed to load configuration '{}'", path.display())
                })?,
                None => BreakingConfig::default(),
            };

            if let Some(generation) = generation {
                config.generation = generation;
            }
            if let Some(rules) = use_rules {
                config.use_rules = split_list(&rules);
            }
            if let Some(except) = except_rules {
                config.except_rules = split_list(&except);
            }
            if flag_added_inputs {
                config.flag_added_required_inputs = true;
            }

            let (base_registry, pr_registry) = load_pair(&provider, &base, &pr)?;
            let base_surface = Surface::try_from(base_registry)?;
            let pr_surface = Surface::try_from(pr_registry)?;

            let breaking_result = base_surface.check_breaking_changes_with_config(&pr_surface, &config);

            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&breaking_result)?;
                    println!("{}", json);
                }
                OutputFormat::Text => {
                    println!("{}", report::format_breaking_changes(&breaking_result.changes));
                }
            }

            if report::has_breaking_changes(&breaking_result.changes) {
                std::process::exit(1);
            }
        }
        Commands::Compare { base, pr } => {
            let (base_registry, pr_registry) = load_pair(&provider, &base, &pr)?;
            let base_surface = Surface::try_from(base_registry)?;
            let pr_surface = Surface::try_from(pr_registry)?;

            match base_surface.compare_with(&pr_surface) {
                Compatibility::Green => {
                    println!("Green: Registries declare identical interfaces");
                }
                Compatibility::Yellow => {
                    println!("Yellow: PR registry is backward-compatible with base registry");
                }
                Compatibility::Red => {
                    println!("Red: Breaking change detected");
                    std::process::exit(1);
                }
            }
        }
        Commands::Fingerprint { path } => {
            let registry = provider.load(&path)?;
            let fingerprint = node_sign::generate_fingerprint(&registry)?;
            println!("{}", fingerprint);
        }
    }

    Ok(())
}
