use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use faultline_error::{Boundary, Domain, ErrorPolicy, PropagateExt, Result};
use faultline_repo::Repository;
use faultline_store::FsStore;

use crate::commands;
use crate::config::Config;
use crate::prompt::Prompt;

#[derive(Debug, Parser)]
#[command(name = "faultline", version, about = "Records on disk, with failures handled by kind")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "FAULTLINE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Store root; overrides `root` from the configuration
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a record, asking for another name while it does not exist
    Read { name: String },
    /// Print the first lines of a record
    Head {
        name: String,
        #[arg(short = 'n', long, default_value_t = 10, allow_negative_numbers = true)]
        count: i64,
    },
    /// Print a counter record
    Counter { name: String },
    /// Add to a counter record, creating it at zero if needed
    Increment {
        name: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },
    /// Integer division
    Divide {
        #[arg(allow_negative_numbers = true)]
        dividend: i64,
        #[arg(allow_negative_numbers = true)]
        divisor: i64,
    },
    /// Store a record
    Write { name: String, contents: String },
    /// Count the words in a record
    Wc { name: String },
    /// List record names
    List,
}

/// Execute one command. Whatever failure comes back is for the outermost boundary.
pub async fn run<E, P, W>(
    cli: Cli,
    config: &Config,
    boundary: &Boundary<E>,
    prompt: &mut P,
    out: &mut W,
) -> Result<()>
where
    E: ErrorPolicy,
    P: Prompt,
    W: Write,
{
    let root = cli.root.unwrap_or_else(|| config.root.clone());
    tracing::debug!(root = %root.display(), command = ?cli.command, "running");

    match cli.command {
        Command::Divide { dividend, divisor } => {
            writeln!(out, "{}", commands::divide(dividend, divisor)?)?;
        }
        Command::Read { name } => {
            let repo = open_repo(&root).await?;
            let (found, contents) =
                commands::read_with_retry(&repo, boundary, prompt, &name, config.max_attempts)
                    .await?;
            if found != name {
                tracing::info!(requested = %name, found = %found, "read substitute record");
            }
            write!(out, "{contents}")?;
        }
        Command::Head { name, count } => {
            let repo = open_repo(&root).await?;
            for line in commands::head(&repo, boundary.emitter(), &name, count).await? {
                writeln!(out, "{line}")?;
            }
        }
        Command::Counter { name } => {
            let repo = open_repo(&root).await?;
            writeln!(out, "{}", commands::counter(&repo, &name).await?)?;
        }
        Command::Increment { name, by } => {
            let repo = open_repo(&root).await?;
            writeln!(out, "{}", commands::increment(&repo, &name, by).await?)?;
        }
        Command::Write { name, contents } => {
            open_repo(&root).await?.save(&name, &contents).await?;
        }
        Command::Wc { name } => {
            let repo = open_repo(&root).await?;
            writeln!(out, "{}", commands::word_count(&repo, &name).await?)?;
        }
        Command::List => {
            for key in open_repo(&root).await?.keys().await? {
                writeln!(out, "{key}")?;
            }
        }
    }
    Ok(())
}

/// Commands that touch records open the store only when they run.
async fn open_repo(root: &Path) -> Result<Repository<FsStore>> {
    let store = FsStore::open(root)
        .await
        .translate_to(Domain::CLI, format!("cannot open store at {}", root.display()))?;
    Ok(Repository::new(store))
}
