//! tutormark CLI - render tutor Markdown and chart palettes from the shell.
//!
//! Provides commands for:
//! - `render`: Render a Markdown file (or stdin) to an HTML fragment
//! - `palette`: Print colours for a number of chart series
//! - `hsl`: Show the HSL components of a hex colour

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{HslArgs, PaletteArgs, RenderArgs};

#[derive(Parser)]
#[command(name = "tutormark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown to HTML.
    Render(RenderArgs),
    /// Print chart series colours, one per line.
    Palette(PaletteArgs),
    /// Convert a hex colour to HSL.
    Hsl(HslArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Palette(args) => args.execute(),
        Commands::Hsl(args) => args.execute(),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
