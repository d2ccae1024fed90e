use anyhow::{bail, Context, Result};
use clap::Parser;
use route_finder::{
    sdk::config::OrsConfig,
    sdk::pipeline::{RoutePlanner, TripInput},
    sdk::render::render_html,
    sdk::routing::ReqwestTransport,
    sdk::util::log::init_logging,
};
use std::{fs, path::PathBuf, sync::Arc};

/// Geocode a trip, route it through OpenRouteService and print turn-by-turn directions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start location (address or place name)
    #[arg(short, long)]
    start: String,

    /// Destination (address or place name)
    #[arg(short, long)]
    destination: String,

    /// Intermediate stop, visited in the order given. Repeatable
    #[arg(short, long = "waypoint")]
    waypoints: Vec<String>,

    /// File with one waypoint per line, appended after any --waypoint values
    #[arg(long)]
    waypoints_file: Option<PathBuf>,

    /// Write a standalone Leaflet map of the route to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write the map scene (markers, line, viewport) as JSON to this file
    #[arg(long)]
    scene_json: Option<PathBuf>,

    /// OpenRouteService base URL
    #[arg(long, env = "ORS_BASE_URL")]
    base_url: Option<String>,

    /// Client-side request budget per minute (0 disables throttling)
    #[arg(long, env = "ORS_REQUESTS_PER_MINUTE")]
    requests_per_minute: Option<u32>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = OrsConfig::from_env().context("loading OpenRouteService settings")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(per_minute) = cli.requests_per_minute {
        config = config.with_requests_per_minute(per_minute);
    }

    let mut waypoints_text = cli.waypoints.join("\n");
    if let Some(path) = &cli.waypoints_file {
        let file_text = fs::read_to_string(path)
            .with_context(|| format!("reading waypoints from {}", path.display()))?;
        waypoints_text.push('\n');
        waypoints_text.push_str(&file_text);
    }
    let input = TripInput::from_fields(&cli.start, &cli.destination, &waypoints_text);
    if input.start.trim().is_empty() || input.destination.trim().is_empty() {
        bail!("both --start and --destination must be non-blank");
    }

    let transport = ReqwestTransport::new().context("building HTTP client")?;
    let planner = RoutePlanner::from_config(&config, Arc::new(transport));

    log::info!(
        "Planning route from \"{}\" to \"{}\" via {} waypoint(s)",
        input.start.trim(),
        input.destination.trim(),
        input.waypoints.len()
    );
    let planned = planner.plan(&input).context("could not compute a route")?;

    for dropped in &planned.dropped_waypoints {
        eprintln!("Skipped waypoint \"{}\": {}", dropped.query, dropped.reason);
    }

    println!("Distance/duration: {}", planned.summary);
    println!();
    println!("Directions");
    for line in &planned.directions {
        println!("{}", line);
    }

    if let Some(path) = &cli.scene_json {
        let json = serde_json::to_string_pretty(&planned.scene)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Map scene written to {}", path.display());
    }

    if let Some(path) = &cli.html {
        let title = format!("{} to {}", input.start.trim(), input.destination.trim());
        let html = render_html(
            &planned.scene,
            &title,
            &planned.summary.to_string(),
            &planned.directions,
        );
        fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Map written to {}", path.display());
    }

    Ok(())
}
