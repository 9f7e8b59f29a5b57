use clap::{Parser, Subcommand};
use locedit::{Filter, Provider};
use locedit_cli::{
    check::run_check_command,
    edit::{run_add_command, run_delete_command, run_set_command},
    groups::{run_dump_command, run_groups_command},
    load_config,
    view::run_view_command,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the discovery settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List localization groups with their languages.
    Groups {
        /// Directory to search
        dir: PathBuf,
    },

    /// View the keys of one group in every language.
    View {
        /// Directory to search
        dir: PathBuf,

        /// Group to show, named as `groups` lists it (defaults to
        /// Localizable.strings, or the first group)
        #[arg(short, long)]
        group: Option<String>,

        /// Which keys to show: all, missing or autotranslated
        #[arg(short, long, default_value = "all")]
        filter: Filter,

        /// Only keys whose key or any value contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Display full value without truncation (even in terminal)
        #[arg(long)]
        full: bool,
    },

    /// Set the value of a key in one language.
    Set {
        /// Directory to search
        dir: PathBuf,
        #[arg(short, long)]
        group: String,
        #[arg(short, long)]
        lang: String,
        #[arg(short, long)]
        key: String,
        #[arg(long)]
        value: String,
        /// Comment written above the entry
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Add a key with an empty value to every language of a group.
    Add {
        /// Directory to search
        dir: PathBuf,
        #[arg(short, long)]
        group: String,
        #[arg(short, long)]
        key: String,
        /// Comment written above the entry
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Delete a key from every language of a group.
    Delete {
        /// Directory to search
        dir: PathBuf,
        #[arg(short, long)]
        group: String,
        #[arg(short, long)]
        key: String,
    },

    /// Print all groups as JSON.
    Dump {
        /// Directory to search
        dir: PathBuf,
    },

    /// Report files that only read as property lists or not at all.
    Check {
        /// Directory to search
        dir: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<(), String> {
    let provider = Provider::new(load_config(args.config.as_deref())?);

    match args.commands {
        Commands::Groups { dir } => run_groups_command(&provider, &dir),
        Commands::View {
            dir,
            group,
            filter,
            search,
            full,
        } => run_view_command(
            &provider,
            &dir,
            group.as_deref(),
            filter,
            search.as_deref(),
            full,
        ),
        Commands::Set {
            dir,
            group,
            lang,
            key,
            value,
            message,
        } => run_set_command(&provider, &dir, &group, &lang, &key, &value, message),
        Commands::Add {
            dir,
            group,
            key,
            message,
        } => run_add_command(&provider, &dir, &group, &key, message),
        Commands::Delete { dir, group, key } => run_delete_command(&provider, &dir, &group, &key),
        Commands::Dump { dir } => run_dump_command(&provider, &dir),
        Commands::Check { dir } => run_check_command(&provider, &dir),
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
