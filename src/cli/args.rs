use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "miqat", version, author, about = "Daily prayer times with a live countdown to the next prayer")]
pub struct Cli {
    /// Don't ask for the current position; use the default city
    #[arg(long, global = true)]
    pub no_locate: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and the next prayer
    Times,
    /// Show only the next prayer and the time left until it
    Next {
        /// Resolve as of this time today (HH:MM) instead of now
        #[arg(long)]
        at: Option<String>,
    },
    /// Show the resolved location
    Locate,
    /// Show the config file path and effective settings
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_launches_dashboard() {
        let cli = Cli::try_parse_from(["miqat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_locate);
    }

    #[test]
    fn global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["miqat", "times", "--no-locate"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Times)));
        assert!(cli.no_locate);
    }

    #[test]
    fn next_at_time() {
        let cli = Cli::try_parse_from(["miqat", "next", "--at", "21:00"]).unwrap();
        match cli.command {
            Some(Commands::Next { at }) => assert_eq!(at.as_deref(), Some("21:00")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn config_init() {
        let cli = Cli::try_parse_from(["miqat", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config { init: true })));
    }
}
