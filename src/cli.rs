use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::color::Theme;

#[derive(Parser, Debug)]
#[command(name = "roundarea")]
#[command(author, version, about = "Circular progress indicator that fills like rising liquid")]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Animate the progress circle in the terminal (default)
    Run(RunArgs),

    /// Write a commented config template to the default location
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the fill geometry for one progress value
    Geometry {
        #[arg(allow_negative_numbers = true)]
        progress: i32,

        #[arg(short, long, default_value = "100")]
        max_value: i32,

        #[arg(short, long, default_value = "100.0")]
        radius: f32,

        #[arg(short, long, default_value = "0.0")]
        stroke_width: f32,
    },

    /// Print the stored angle table next to the numerically solved angles
    Table,

    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Value at which the circle is full
    #[arg(long)]
    pub max_value: Option<i32>,

    /// Milliseconds between progress steps
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Amount added per step
    #[arg(long)]
    pub step: Option<i32>,

    /// Start paused (press space to run)
    #[arg(long)]
    pub paused: bool,

    /// Start over after reaching the maximum
    #[arg(long = "loop")]
    pub loop_when_done: bool,

    /// Circle radius in canvas pixels
    #[arg(short, long)]
    pub radius: Option<f32>,

    /// Ring stroke width in canvas pixels
    #[arg(long)]
    pub stroke_width: Option<f32>,

    /// Hide the percentage label
    #[arg(long)]
    pub hide_text: bool,

    /// Colour theme
    #[arg(short, long, value_enum)]
    pub theme: Option<Theme>,

    /// Liquid colour as hex, overrides the theme
    #[arg(long)]
    pub filled_color: Option<String>,

    /// Ring colour as hex, overrides the theme
    #[arg(long)]
    pub background_color: Option<String>,
}
