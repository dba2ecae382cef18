//! CLI entry point for taskboard.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use taskboard_app::{CONFIG_FILE, ProjectConfig};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;

/// Minimal to-do service backed by SQLite.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    version,
    about = "taskboard: a small to-do REST API and its command-line client"
)]
struct Cli {
    /// Configuration file (missing file means defaults).
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Database path; overrides `[storage] path`. Use `:memory:` for an ephemeral store.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address; overrides `[server] bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Create a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// List active tasks.
    Ls {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Change fields of an active task.
    Update {
        #[arg(long)]
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Soft-delete a task.
    Rm {
        #[arg(long)]
        task: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let Cli { config, db, cmd } = Cli::parse();
    install_tracing();

    let mut config = ProjectConfig::load(&config)?;
    if let Some(path) = db {
        config.storage.path = path;
    }
    commands::run(cmd, config)
}

fn install_tracing() {
    // RUST_LOG overrides; INFO by default. Logs go to stderr so `ls --format json` stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "taskboard",
            "add",
            "--title",
            "Buy milk",
            "--category",
            "shopping",
            "--priority",
            "high",
        ]);

        match cli.cmd {
            Command::Add {
                title,
                category,
                priority,
                status,
                ..
            } => {
                assert_eq!(title, "Buy milk");
                assert_eq!(category.as_deref(), Some("shopping"));
                assert_eq!(priority.as_deref(), Some("high"));
                assert!(status.is_none());
            }
            _ => panic!("expected add command"),
        }
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn parse_serve_with_global_db_after_subcommand() {
        let cli = Cli::parse_from([
            "taskboard",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--db",
            ":memory:",
        ]);

        match cli.cmd {
            Command::Serve { bind } => {
                assert_eq!(bind.map(|addr| addr.port()), Some(8080));
            }
            _ => panic!("expected serve command"),
        }
        assert_eq!(cli.db, Some(PathBuf::from(":memory:")));
    }

    #[test]
    fn parse_ls_defaults_to_table() {
        let cli = Cli::parse_from(["taskboard", "ls", "--status", "completed"]);

        match cli.cmd {
            Command::Ls { status, format, .. } => {
                assert_eq!(status.as_deref(), Some("completed"));
                assert_eq!(format, LsFormat::Table);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn parse_ls_json_format() {
        let cli = Cli::parse_from(["taskboard", "ls", "--format", "json"]);
        assert!(matches!(
            cli.cmd,
            Command::Ls {
                format: LsFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn parse_update_and_rm_commands() {
        let id = "01926d3c-8f7a-7cc0-b5a4-2f3e1a9d0c11";
        let cli = Cli::parse_from(["taskboard", "update", "--task", id, "--status", "completed"]);
        match cli.cmd {
            Command::Update { task, status, title, .. } => {
                assert_eq!(task, id);
                assert_eq!(status.as_deref(), Some("completed"));
                assert!(title.is_none());
            }
            _ => panic!("expected update command"),
        }

        let cli = Cli::parse_from(["taskboard", "rm", "--task", id]);
        assert!(matches!(cli.cmd, Command::Rm { task } if task == id));
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["taskboard", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
