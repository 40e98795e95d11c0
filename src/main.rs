use argoql::{
   Result,
   cmd::{self, ask::AskOptions},
};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the argoql application
#[derive(Parser)]
#[command(name = "argoql")]
#[command(about = "Natural-language queries over ARGO float profiles")]
#[command(version)]
struct Cli {
   #[arg(long, env = "ARGOQL_SESSION", help = "Session id to attach to")]
   session: Option<String>,

   #[command(subcommand)]
   command: Option<Cmd>,

   #[arg(trailing_var_arg = true)]
   query: Vec<String>,
}

/// Available subcommands for argoql
#[derive(Subcommand)]
enum Cmd {
   #[command(about = "Extract and validate filters, print the MCP payload")]
   Plan {
      #[arg(help = "Natural-language query")]
      query: String,

      #[arg(long, help = "JSON output")]
      json: bool,
   },

   #[command(about = "Print the deterministic SELECT for a query")]
   Sql {
      #[arg(help = "Natural-language query")]
      query: String,
   },

   #[command(about = "Run a query end to end (completion, safety gate, execution)")]
   Ask {
      #[arg(help = "Natural-language query")]
      query: String,

      #[arg(long, help = "Skip the completion service, use the synthesizer")]
      offline: bool,

      #[arg(long, help = "Print the gated statement without executing")]
      dry_run: bool,

      #[arg(long, help = "JSON output")]
      json: bool,
   },
}

#[tokio::main]
async fn main() {
   tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
      .init();

   let cli = Cli::parse();
   if let Err(err) = run(cli).await {
      eprintln!("{err}");
      std::process::exit(err.exit_code());
   }
}

async fn run(cli: Cli) -> Result<()> {
   if cli.command.is_none() && !cli.query.is_empty() {
      let query = cli.query.join(" ");
      return cmd::ask::execute(
         query,
         cli.session,
         AskOptions { offline: false, dry_run: false, json: false },
      )
      .await;
   }

   match cli.command {
      Some(Cmd::Plan { query, json }) => cmd::plan::execute(query, cli.session, json),
      Some(Cmd::Sql { query }) => cmd::sql::execute(query, cli.session),
      Some(Cmd::Ask { query, offline, dry_run, json }) => {
         cmd::ask::execute(query, cli.session, AskOptions { offline, dry_run, json }).await
      },
      None => {
         eprintln!("no command or query provided; try `argoql plan \"...\"`");
         std::process::exit(2);
      },
   }
}
