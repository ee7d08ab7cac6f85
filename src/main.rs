use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use roundarea::cli::{Cli, Command, RunArgs};
use roundarea::config::Config;
use roundarea::display;
use roundarea::geometry::{self, table, CircleSpec};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        None => run(cli.config, &cli.run).await,
        Some(Command::Run(ref args)) => run(cli.config.clone(), args).await,
        Some(Command::Init { force }) => init(cli.config, force),
        Some(Command::Geometry {
            progress,
            max_value,
            radius,
            stroke_width,
        }) => print_geometry(progress, max_value, radius, stroke_width),
        Some(Command::Table) => print_table(),
        Some(Command::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "roundarea", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("roundarea=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn run(config_path: Option<PathBuf>, args: &RunArgs) -> Result<()> {
    // Load or create config
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(args);
    config.validate()?;

    info!(
        "Starting roundarea: max {} step {} theme {}",
        config.progress.max_value,
        config.progress.step,
        config.colors.theme.name()
    );

    display::terminal::run(config, config_path).await
}

fn init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = Config::init_config(config_path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_geometry(progress: i32, max_value: i32, radius: f32, stroke_width: f32) -> Result<()> {
    let g = geometry::compute_fill_geometry(progress, max_value, radius)?;
    let spec = CircleSpec {
        radius,
        stroke_width,
        ..CircleSpec::default()
    };

    println!("progress      {}/{}", progress, max_value);
    println!("phase         {:?}", g.phase);
    println!("radians       {:.6}", g.radians);
    println!("start_angle   {:.3}", g.start_angle);
    println!("sweep_angle   {:.3}", g.sweep_angle);
    println!("filled_height {:.3}", g.filled_height);
    println!("half_width    {:.3}", g.half_width(&spec));
    if let Some([apex, left, right]) = g.waterline_triangle(radius, radius, &spec) {
        println!(
            "triangle      ({:.2}, {:.2}) ({:.2}, {:.2}) ({:.2}, {:.2})",
            apex.0, apex.1, left.0, left.1, right.0, right.1
        );
    }
    Ok(())
}

fn print_table() -> Result<()> {
    println!("{:>5} {:>10} {:>12} {:>10}", "index", "stored", "solved", "delta");
    for index in 0..=table::MAX_INDEX {
        let stored = table::angle_for(index)?;
        let solved = geometry::solve_half_angle(f64::from(index) / 100.0)?;
        println!(
            "{:>5} {:>10.6} {:>12.9} {:>10.2e}",
            index,
            stored,
            solved,
            stored - solved
        );
    }
    Ok(())
}
