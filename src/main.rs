use std::io::{self, BufRead, Write};

use school_finder::config::Settings;
use school_finder::core::{display_rows, MapSession, Ranker, Ranking, NOT_APPLICABLE};
use school_finder::models::{ReferencePoint, SchoolId};
use school_finder::services::SchoolDataset;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// One line of input from the map stand-in
#[derive(Debug, PartialEq)]
enum MapEvent {
    Move(ReferencePoint),
    Focus(SchoolId),
    ClearFocus,
}

fn parse_event(line: &str) -> Option<MapEvent> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "clear" => Some(MapEvent::ClearFocus),
        "focus" => parts.next()?.parse().ok().map(MapEvent::Focus),
        lat => {
            let lat: f64 = lat.trim_end_matches(',').parse().ok()?;
            let lng: f64 = parts.next()?.parse().ok()?;
            let reference = ReferencePoint::new(lat, lng);
            // Off-map points would rank nothing
            reference
                .coordinates()
                .is_valid()
                .then_some(MapEvent::Move(reference))
        }
    }
}

fn print_ranking(out: &mut impl Write, ranking: &Ranking<'_>) -> io::Result<()> {
    let results = match ranking {
        Ranking::NotReady => return writeln!(out, "Loading..."),
        Ranking::Ready(results) => results,
    };

    writeln!(
        out,
        "{:>6}  {:<40} {:>7} {:>6} {:>8}  {:<10}  {}",
        "pin", "name", "dist", "match", "apps plc", "inspected", "rating"
    )?;
    for row in display_rows(results) {
        writeln!(
            out,
            "{:>6}  {:<40} {:>7} {:>6} {:>8}  {:<10}  {}",
            row.school_id,
            row.name,
            row.distance_label,
            row.tier,
            row.applications_per_offer_label,
            row.inspection_date,
            row.inspection_rating
        )?;
    }
    Ok(())
}

fn print_focus(out: &mut impl Write, session: &MapSession, dataset: &SchoolDataset) -> io::Result<()> {
    match session.focus_overlay(dataset) {
        Some(overlay) => writeln!(
            out,
            "focus {} at ({}, {}) radius {:.0}m",
            overlay.school_id,
            overlay.coordinates.latitude,
            overlay.coordinates.longitude,
            overlay.radius_metres
        ),
        None => writeln!(out, "focus {}", NOT_APPLICABLE),
    }
}

fn render(session: &MapSession, ranker: &Ranker, dataset: &SchoolDataset) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_ranking(&mut out, &session.ranking(ranker, dataset))?;
    print_focus(&mut out, session, dataset)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting school finder...");

    let dataset = SchoolDataset::load(&settings.dataset.path).map_err(|e| {
        error!("Failed to load dataset: {}", e);
        e
    })?;
    let ranker = settings.ranker();
    info!(
        "Ranker initialized with boundaries {:?}, cutoff {}",
        ranker.classifier().boundaries(),
        ranker.plausible_ratio()
    );

    let mut session = MapSession::with_reference(settings.initial_reference());
    render(&session, &ranker, &dataset)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_event(&line) {
            Some(MapEvent::Move(reference)) => session.move_reference(reference),
            Some(MapEvent::Focus(id)) => {
                if let Err(e) = session.focus(id, &dataset) {
                    warn!("{}", e);
                    continue;
                }
            }
            Some(MapEvent::ClearFocus) => session.clear_focus(),
            None => {
                warn!("Unrecognised input: {:?}", line);
                continue;
            }
        }

        render(&session, &ranker, &dataset)?;
    }

    Ok(())
}
