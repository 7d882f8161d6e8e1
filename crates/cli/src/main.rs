use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "educa", about = "Learner account tooling for educa", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "educa.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the configuration
        #[arg(long, default_value = "educa.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate a username for a full name
    Username {
        full_name: String,
        /// File with taken usernames, one per line
        #[arg(long)]
        taken: Option<String>,
        /// Numbered variants to try after the named candidates
        #[arg(long)]
        max_attempts: Option<usize>,
    },
    /// Show the ordered username candidates for a full name
    Candidates { full_name: String },
    /// Show the next matricula code
    Matricula {
        /// Year to issue the code for (defaults to the current year)
        #[arg(long)]
        year: Option<String>,
    },
    /// Create a learner account and add it to the roster
    Provision {
        full_name: String,
        /// Use this matricula instead of generating one
        #[arg(long)]
        matricula: Option<String>,
        /// Use this password instead of generating a temporary one
        #[arg(long)]
        password: Option<String>,
        /// Print the account without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// List accounts in the roster
    List,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => {
            commands::init::run(&path, force)?;
        }
        Commands::Username {
            full_name,
            taken,
            max_attempts,
        } => {
            commands::username::run(&cli.config, &full_name, taken.as_deref(), max_attempts)?;
        }
        Commands::Candidates { full_name } => {
            commands::username::candidates(&cli.config, &full_name)?;
        }
        Commands::Matricula { year } => {
            commands::matricula::run(&cli.config, year.as_deref())?;
        }
        Commands::Provision {
            full_name,
            matricula,
            password,
            dry_run,
        } => {
            commands::provision::run(&cli.config, full_name, matricula, password, dry_run)?;
        }
        Commands::List => {
            commands::list::run(&cli.config)?;
        }
    }

    Ok(())
}
