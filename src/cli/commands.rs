use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sonda", version, about = "Passive web security scanner with AI-assisted report synthesis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a single target URL and print the report
    Scan(ScanArgs),
    /// Start the HTTP REST API server
    Serve(ServeArgs),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Target URL (absolute http/https)
    pub target: String,

    /// Output format: json or text
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Listening port
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}
