//! heroscope - browse Marvel characters from the terminal

use clap::Parser;

mod browse;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, HeroCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--debug` selects debug and the default is warn.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("heroscope version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Hero(hero_cmd) => match hero_cmd {
            HeroCommands::List {
                search,
                sort,
                comic,
                series,
                event,
                filter,
                local_sort,
                pagination,
            } => {
                let args = cli::hero::ListArgs {
                    search,
                    sort,
                    comic,
                    series,
                    event,
                    filter,
                    local_sort,
                };
                cli::hero::list(&opts, &args, &pagination).await
            }
            HeroCommands::Browse {
                search,
                sort,
                filter,
                local_sort,
                pagination,
            } => {
                let args = cli::hero::ListArgs {
                    search,
                    sort,
                    filter,
                    local_sort,
                    ..Default::default()
                };
                cli::hero::browse(&opts, &args, &pagination).await
            }
            HeroCommands::Get { id } => cli::hero::get(&opts, id).await,
            HeroCommands::Comics { id, limit } => cli::hero::comics(&opts, id, limit).await,
            HeroCommands::Series { id, limit } => cli::hero::series(&opts, id, limit).await,
            HeroCommands::Events { id, limit } => cli::hero::events(&opts, id, limit).await,
        },
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
