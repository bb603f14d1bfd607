use clap::{builder::BoolishValueParser, ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "appointment-catalog",
    about = "Appointment type catalog service",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default).
    Serve(ServeArgs),
    /// Apply pending schema migrations and exit.
    Migrate(DatabaseArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Keep rows in process memory instead of MySQL.
    #[arg(long)]
    pub in_memory: bool,

    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Apply pending migrations before serving.
    #[arg(
        long,
        env = "RUN_MIGRATIONS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub run_migrations: bool,
}

impl Cli {
    /// Without a subcommand the top-level flags are serve flags.
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}
