mod analysis;
mod config;
mod dashboard;
mod data;
mod display;
mod error;
mod render;
mod server;

use clap::Parser;
use config::Config;
use dashboard::{build_page, Dashboard};
use display::output::{display_error, display_info, display_series, display_success, display_summary};
use error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "Player Dashboard")]
#[command(about = "Per-map performance dashboard for a single player", long_about = None)]
struct Args {
    /// Match CSV (semicolon separated, latin-1)
    #[arg(long)]
    matches: Option<PathBuf>,

    /// Series results CSV (comma separated)
    #[arg(long)]
    series: Option<PathBuf>,

    /// Player photo shown on the stat card
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Directory holding the team logos
    #[arg(long)]
    logos: Option<PathBuf>,

    /// Address to bind (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default: 8501)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the console report and exit without serving
    #[arg(long)]
    summary_only: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(path) = args.matches {
        config.matches_csv = path;
    }
    if let Some(path) = args.series {
        config.series_csv = path;
    }
    if let Some(path) = args.photo {
        config.photo = path;
    }
    if let Some(dir) = args.logos {
        config.logo_dir = dir;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    display_info(&format!("Loading matches from {}", config.matches_csv.display()));
    let dashboard = Dashboard::load(&config)?;
    display_success(&format!(
        "Loaded {} maps and {} series",
        dashboard.rows.len(),
        dashboard.series.len()
    ));

    display_summary(&config.profile.name, &dashboard.summary, &dashboard.maps);
    display_series(&dashboard.series);

    // Render once up front so missing images or unknown teams stop the run here.
    display_info("Checking photo and team logos...");
    build_page(&config)?;
    display_success("Dashboard renders cleanly");

    if args.summary_only {
        return Ok(());
    }

    actix_web::rt::System::new().block_on(server::serve(config))
}
