//! Command dispatch
//!
//! Each command computes its output as a string so the formatting can be
//! tested without capturing stdout.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, ExprCommands, TreeCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings, ShowStyle};
use crate::domain::{Expression, Tree};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { command }) => execute_tree(command),
        Some(Commands::Expr { command }) => execute_expr(command),
        Some(Commands::Config { command }) => execute_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn execute_tree(command: &TreeCommands) -> CliResult<()> {
    match command {
        TreeCommands::Normalize { text } => output::info(&normalize(text)?),
        TreeCommands::Show { text, style } => {
            let settings = Settings::load()?;
            let style = style.unwrap_or(settings.show_style);
            print!("{}", show(text, style, settings.indent)?);
        }
        TreeCommands::Equal { left, right } => {
            let report = compare(left, right)?;
            output::action("equal", &report.equal);
            output::action("left hash", &report.left_hash);
            output::action("right hash", &report.right_hash);
        }
    }
    Ok(())
}

fn execute_expr(command: &ExprCommands) -> CliResult<()> {
    match command {
        ExprCommands::Eval { expression } => output::info(&eval(expression)?),
        ExprCommands::Infix { expression } => output::info(&infix(expression)?),
    }
    Ok(())
}

fn execute_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::header("Effective settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::action("global", &path.display()),
            None => output::action("global", "unavailable (no home directory)"),
        },
    }
    Ok(())
}

#[instrument(level = "debug")]
pub fn normalize(text: &str) -> CliResult<String> {
    let tree = Tree::parse(text)?;
    Ok(tree.to_string())
}

#[instrument(level = "debug")]
pub fn show(text: &str, style: ShowStyle, indent: usize) -> CliResult<String> {
    let tree = Tree::parse(text)?;
    let rendered = match style {
        ShowStyle::Termtree => tree.to_tree_string().to_string(),
        ShowStyle::Indent => tree.to_indented_string_by(indent),
    };
    Ok(rendered)
}

/// Outcome of `tree equal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub equal: bool,
    pub left_hash: u64,
    pub right_hash: u64,
}

#[instrument(level = "debug")]
pub fn compare(left: &str, right: &str) -> CliResult<Comparison> {
    let left = Tree::parse(left)?;
    let right = Tree::parse(right)?;
    let comparison = Comparison {
        equal: left == right,
        left_hash: left.hash_code(),
        right_hash: right.hash_code(),
    };
    debug!("comparison: {:?}", comparison);
    Ok(comparison)
}

#[instrument(level = "debug")]
pub fn eval(expression: &str) -> CliResult<i64> {
    Ok(Expression::new(expression)?.evaluate()?)
}

#[instrument(level = "debug")]
pub fn infix(expression: &str) -> CliResult<String> {
    Ok(Expression::new(expression)?.to_string())
}
