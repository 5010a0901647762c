//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

use crate::config::ShowStyle;

/// Ordered n-ary trees in canonical text form, and prefix arithmetic on top of them
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and inspect trees
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },

    /// Validate, evaluate and render prefix expressions
    Expr {
        #[command(subcommand)]
        command: ExprCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    /// Print the canonical one-line form
    Normalize {
        /// Tree text, e.g. "a (b c (d))"
        text: String,
    },

    /// Print the tree one node per line
    Show {
        /// Tree text
        text: String,
        /// Layout (default from config)
        #[arg(short, long, value_enum)]
        style: Option<ShowStyle>,
    },

    /// Compare two trees structurally
    Equal {
        /// First tree text
        left: String,
        /// Second tree text
        right: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExprCommands {
    /// Evaluate to an integer
    Eval {
        /// Prefix expression, e.g. "+ (5 10 -( *(15 20) 25) 30)"
        expression: String,
    },

    /// Render as fully parenthesized infix
    Infix {
        /// Prefix expression
        expression: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
