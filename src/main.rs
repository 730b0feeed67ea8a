//! cg - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use semver::Version;
use tracing_subscriber::EnvFilter;

use changelog_gen::config::{Config, resolve_config_path};
use changelog_gen::git::GitHistory;
use changelog_gen::init::run_init;
use changelog_gen::release::{GenerateOutcome, GenerateRequest, generate, generate_summary};

/// Changelog generator.
#[derive(Parser, Debug)]
#[command(name = "cg")]
#[command(about = "Generate a changelog from task-tagged commits")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $CG_CONFIG, then ./cg.config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate changelog
    #[command(visible_aliases = ["gen", "g"])]
    Generate(GenerateArgs),

    /// Init config
    #[command(visible_alias = "i")]
    Init,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Get commits from hash (the newer end of the range)
    #[arg(long, value_name = "HASH")]
    from_commit: Option<String>,

    /// Get commits to hash (the older end of the range)
    #[arg(long, value_name = "HASH")]
    to_commit: Option<String>,

    /// Release version. Example: 1.0.0
    #[arg(long, value_name = "VERSION")]
    release_version: Option<Version>,

    /// Release date. Example: 2012-12-21
    #[arg(long, value_name = "DATE")]
    release_date: Option<String>,

    /// Add links to the task tracker
    #[arg(long)]
    jira_link: bool,

    /// Dry run - print the release without writing
    #[arg(long)]
    dry_run: bool,

    /// Skip checkout and pull of the changelog branch
    #[arg(long)]
    no_sync: bool,

    /// Changelog file (overrides changelogFileName from the config)
    #[arg(long, value_name = "PATH")]
    changelog: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config_path = resolve_config_path(cli.config.as_deref(), &cwd);

    match cli.command {
        Command::Init => run_init_command(&config_path),
        Command::Generate(args) => run_generate(args, &config_path, &cwd),
    }
}

/// Console logging: RUST_LOG if set, otherwise `warn` (`debug` with --verbose).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_init_command(config_path: &Path) -> Result<()> {
    if run_init(config_path).context("Failed to initialise config")? {
        println!("✓ Config saved to {}", config_path.display());
    } else {
        println!("Config left unchanged.");
    }
    Ok(())
}

fn run_generate(args: GenerateArgs, config_path: &Path, cwd: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load config")?;
    let config = config.compile().context("Invalid config")?;

    let changelog_path = args
        .changelog
        .unwrap_or_else(|| cwd.join(&config.changelog_file_name));

    let request = GenerateRequest {
        repo_path: cwd.to_path_buf(),
        changelog_path: changelog_path.clone(),
        from_commit: args.from_commit,
        to_commit: args.to_commit,
        release_version: args.release_version,
        release_date: args.release_date,
        with_link: args.jira_link,
        dry_run: args.dry_run,
        sync: !args.no_sync,
    };

    let outcome = generate(&GitHistory, &request, &config).context("Failed to generate changelog")?;

    match outcome {
        GenerateOutcome::NoCommits => {
            eprintln!("Warning: Commits not found. {} was not changed.", changelog_path.display());
        }
        GenerateOutcome::Preview { release } => {
            println!("\n--- Dry Run Output ({}) ---\n", changelog_path.display());
            println!("{}", release.trim_end());
        }
        GenerateOutcome::Written {
            path,
            classification,
        } => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            println!("✓ {}", generate_summary(&classification, &file_name));
            println!("Complete!");
        }
    }

    Ok(())
}
