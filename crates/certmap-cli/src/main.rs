//! certmap — command-line interface for certmap-core
//!
//! This binary runs the certified-company map pipeline headlessly:
//! it loads the dataset and the city index, derives the filter facets,
//! applies a conjunctive filter, and prints the markers the map widget
//! would receive.
//!
//! Usage examples
//! --------------
//!
//! - Show session stats
//!   $ certmap --data roster.csv stats
//!
//! - Print the options of one filter control
//!   $ certmap --data roster.csv facets status
//!
//! - Filter and render
//!   $ certmap --data roster.csv --cities cities.json render --status Completed
//!   $ certmap --data roster.csv render --search "traders"
//!
//! - Print the legend
//!   $ certmap legend
//!
//! Data sources
//! ------------
//!
//! `--data` is required for everything but `legend`. `--cities` points
//! to the primary city-coordinate JSON; when it is missing or broken
//! the built-in fallback table of well-known cities is used instead.

mod args;

use std::path::Path;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use certmap_core::{
    legend, CsvSheetParser, FacetField, FilterSelection, IndexSource, MapSession, MarkerBuffer,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = CliArgs::parse();

    // Legend needs no data at all.
    if matches!(args.command, Commands::Legend) {
        for entry in legend() {
            println!("{:<12} {}", entry.status, entry.color);
        }
        return Ok(());
    }

    let data = args
        .data
        .as_deref()
        .context("--data <path> is required for this command")?;
    let cities = args.cities.as_deref().map(Path::new);
    let session = MapSession::open(data, cities, &CsvSheetParser)?;

    match args.command {
        Commands::Stats => {
            let stats = session.stats();
            println!("Session statistics:");
            println!("  Rows: {}", stats.rows);
            println!("  Resolvable cities: {}", stats.resolvable);
            println!("  Distinct facet values: {}", stats.facet_values);
            let source = match session.city_index().source() {
                IndexSource::Primary => "primary resource",
                IndexSource::Fallback => "fallback table",
            };
            println!(
                "  City index: {} entries ({source})",
                session.city_index().len()
            );
        }

        Commands::Facets { field } => {
            let fields: Vec<FacetField> = match field.as_deref() {
                Some(name) => vec![parse_field(name)?],
                None => FacetField::ALL.to_vec(),
            };
            for field in fields {
                println!("{}:", field.label());
                for option in session.facets().options(field) {
                    println!("  {option}");
                }
            }
        }

        Commands::Render {
            status,
            category,
            city,
            state,
            poc,
            team,
            year,
            search,
        } => {
            let selection = FilterSelection {
                status,
                category,
                city,
                state,
                poc,
                gp_team: team,
                year,
                search,
            };
            let mut sink = MarkerBuffer::default();
            let stats = session.refresh(&selection, &mut sink);
            for marker in &sink.markers {
                let popup = &marker.popup;
                let mut line = format!(
                    "({:.4}, {:.4}) {} [{} {}]",
                    marker.latitude, marker.longitude, popup.company, popup.status, marker.color
                );
                if let Some(location) = &popup.location {
                    line.push_str(&format!(" @ {location}"));
                }
                if let Some(year) = &popup.year {
                    line.push_str(&format!(" ({year})"));
                }
                println!("{line}");
            }
            println!("Plotted: {}  Missing: {}", stats.plotted, stats.missing);
        }

        Commands::Legend => unreachable!("handled above"),
    }

    Ok(())
}

fn parse_field(name: &str) -> anyhow::Result<FacetField> {
    let field = match name.to_ascii_lowercase().as_str() {
        "status" => FacetField::Status,
        "category" => FacetField::Category,
        "city" => FacetField::City,
        "state" => FacetField::State,
        "poc" => FacetField::Poc,
        "team" | "gp-team" | "gpteam" => FacetField::GpTeam,
        "year" => FacetField::Year,
        other => anyhow::bail!(
            "unknown facet field '{other}' (expected status, category, city, state, poc, team, year)"
        ),
    };
    Ok(field)
}
