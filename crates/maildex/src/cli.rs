//! Command line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "maildex",
    version,
    about = "Summarise local maildir folders and messages with user-defined formats",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Directory holding the maildir folders (default: ~/Maildir)
    #[arg(long, global = true, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Settings file (default: <config dir>/maildex/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show maildir folders beneath the prefix
    Maildirs {
        /// Render `name` relative to the prefix
        #[arg(long)]
        short: bool,

        /// Show only folders containing unread messages
        #[arg(long)]
        unread: bool,

        /// Format of each line
        #[arg(long, value_name = "TEMPLATE")]
        format: Option<String>,
    },

    /// Show the messages of one or more folders, oldest first
    Messages {
        /// Format of each line
        #[arg(long, value_name = "TEMPLATE")]
        format: Option<String>,

        /// Print lines as soon as they are rendered
        #[arg(long)]
        arrival_order: bool,

        /// Folder paths, absolute or relative to the prefix
        #[arg(value_name = "FOLDER", required = true)]
        folders: Vec<String>,
    },

    /// Show single messages
    Message {
        /// File holding the view template
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Print the default view template and exit
        #[arg(long)]
        dump_template: bool,

        /// Message files
        #[arg(value_name = "FILE", required_unless_present = "dump_template")]
        files: Vec<PathBuf>,
    },
}
