//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod context;
pub mod hero;
pub mod init;
pub mod progress;
pub mod status;

pub use args::{LocalSortKey, OutputFormat, PaginationArgs, SortKey};
pub use context::CommandContext;

/// heroscope - browse Marvel characters from the terminal
#[derive(Parser, Debug)]
#[command(name = "heroscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "HEROSCOPE_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "HEROSCOPE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "HEROSCOPE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Custom API base URL
    #[arg(long, global = true, env = "HEROSCOPE_API_HOST", hide_env = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure Marvel API keys
    Init,

    /// Show configuration and API key status
    Status,

    /// Display version information
    Version,

    /// Browse characters
    #[command(subcommand)]
    Hero(HeroCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   heroscope completion bash > /etc/bash_completion.d/heroscope
  zsh:    heroscope completion zsh > \"${fpath[1]}/_heroscope\"
  fish:   heroscope completion fish > ~/.config/fish/completions/heroscope.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Character subcommands
#[derive(Subcommand, Debug)]
pub enum HeroCommands {
    /// List characters page by page
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            heroscope hero list                      # First page, A-Z\n  \
            heroscope hero list --search spider      # Names starting with \"spider\"\n  \
            heroscope hero list --sort -modified -p 2\n  \
            heroscope hero list --comic 21366        # Characters in a comic\n  \
            heroscope hero list --filter genius      # Name or description on this page"
    )]
    List {
        /// Only names starting with this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Sort order (name, -name, modified, -modified)
        #[arg(long, value_enum, allow_hyphen_values = true, hide_possible_values = true)]
        sort: Option<SortKey>,

        /// Only characters appearing in this comic
        #[arg(long)]
        comic: Option<u64>,

        /// Only characters appearing in this series
        #[arg(long)]
        series: Option<u64>,

        /// Only characters appearing in this event
        #[arg(long)]
        event: Option<u64>,

        /// Only show heroes on the fetched page whose name or description
        /// contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// Reorder the fetched page by name (default, asc, desc)
        #[arg(long, value_enum, default_value_t = LocalSortKey::Default)]
        local_sort: LocalSortKey,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Page through characters interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Start with names starting with this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Initial sort order (name, -name, modified, -modified)
        #[arg(long, value_enum, allow_hyphen_values = true, hide_possible_values = true)]
        sort: Option<SortKey>,

        /// Only show heroes on the fetched page whose name or description
        /// contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// Reorder the fetched page by name (default, asc, desc)
        #[arg(long, value_enum, default_value_t = LocalSortKey::Default)]
        local_sort: LocalSortKey,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one character
    #[command(visible_alias = "g")]
    Get {
        /// Character ID
        id: u64,
    },

    /// Latest comics featuring a character
    Comics {
        /// Character ID
        id: u64,

        /// Maximum results
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: u32,
    },

    /// Series featuring a character
    Series {
        /// Character ID
        id: u64,

        /// Maximum results
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: u32,
    },

    /// Events featuring a character
    Events {
        /// Character ID
        id: u64,

        /// Maximum results
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hero_list() {
        let cli = Cli::parse_from([
            "heroscope", "hero", "list", "--search", "spi", "--sort", "-modified", "-p", "3",
            "-n", "50", "--format", "json",
        ]);

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Hero(HeroCommands::List {
                search,
                sort,
                pagination,
                ..
            }) => {
                assert_eq!(search.as_deref(), Some("spi"));
                assert_eq!(sort, Some(SortKey::ModifiedDesc));
                assert_eq!(pagination.page, 3);
                assert_eq!(pagination.limit, Some(50));
            }
            other => panic!("Expected hero list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_related_default_limit() {
        let cli = Cli::parse_from(["heroscope", "hero", "comics", "1009610"]);

        match cli.command {
            Commands::Hero(HeroCommands::Comics { id, limit }) => {
                assert_eq!(id, 1009610);
                assert_eq!(limit, 10);
            }
            other => panic!("Expected hero comics, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_local_view_flags() {
        let cli = Cli::parse_from([
            "heroscope", "hero", "list", "--filter", "genius", "--local-sort", "desc",
        ]);

        match cli.command {
            Commands::Hero(HeroCommands::List {
                filter, local_sort, ..
            }) => {
                assert_eq!(filter.as_deref(), Some("genius"));
                assert_eq!(local_sort, LocalSortKey::Desc);
            }
            other => panic!("Expected hero list, got {:?}", other),
        }

        let cli = Cli::parse_from(["heroscope", "hero", "browse"]);
        match cli.command {
            Commands::Hero(HeroCommands::Browse {
                filter, local_sort, ..
            }) => {
                assert_eq!(filter, None);
                assert_eq!(local_sort, LocalSortKey::Default);
            }
            other => panic!("Expected hero browse, got {:?}", other),
        }
    }
}
