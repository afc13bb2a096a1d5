//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "datagrid")]
#[command(about = "Inspect and rearrange the columns of server-rendered data grids", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Page URL the grid lives on
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Element id of the grid
    #[arg(long, global = true)]
    pub grid: Option<String>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    pub width: Option<i32>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    pub height: Option<i32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the visible columns, the column menu and the grid contents
    Show,

    /// Show a hidden column or hide a visible one
    Toggle {
        /// Column id
        column: String,
    },

    /// Drag a column past its neighbours
    Move {
        /// Column id
        column: String,
        /// Direction to drag in
        direction: Direction,
        /// Number of neighbours to pass
        #[arg(default_value_t = 1)]
        steps: usize,
    },

    /// Reload the grid with its stored layout
    Reload,

    /// Print the grid as HTML
    Html,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Pointer step in pixels.
    pub fn delta(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_defaults_to_one_step() {
        let cli = Cli::parse_from(["datagrid", "move", "owner", "left"]);
        match cli.command {
            Command::Move {
                column,
                direction,
                steps,
            } => {
                assert_eq!(column, "owner");
                assert_eq!(direction, Direction::Left);
                assert_eq!(steps, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from(["datagrid", "show", "--grid", "issues", "--width", "640"]);
        assert_eq!(cli.overrides.grid.as_deref(), Some("issues"));
        assert_eq!(cli.overrides.width, Some(640));
        assert!(cli.overrides.url.is_none());
    }
}
