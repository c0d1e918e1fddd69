use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cardcast-admin")]
#[command(about = "Admin endpoints for importing and managing CardCast decks")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cardcast-admin.toml")]
    pub config: String,

    /// Override the listen address from config
    #[arg(long)]
    pub bind: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
