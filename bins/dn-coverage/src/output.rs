//! Terminal output for analysis results.

use danang_coverage::{CoverageAnalysis, Layer, Office};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn join_layers(layers: &[Layer]) -> String {
    layers.iter().map(Layer::to_string).collect::<Vec<_>>().join(", ")
}

/// Print a human-readable analysis report.
pub fn print_analysis(analysis: &CoverageAnalysis, office_count: usize, boundary_count: usize) {
    Status::header("Coverage analysis");
    Status::info(&format!(
        "{} across {}",
        format_count(office_count, "office", "offices"),
        format_count(boundary_count, "boundary", "boundaries")
    ));

    println!();
    for layer in Layer::ALL {
        let areas = analysis.total_coverage.get(layer);
        println!(
            "  {} {}",
            format!("Layer {}:", layer).bold(),
            format_count(areas.len(), "area", "areas")
        );
        if !areas.is_empty() {
            println!("    {}", areas.join(", ").dimmed());
        }
    }

    Status::header("Overlaps");
    if analysis.overlaps.is_empty() {
        Status::info("No overlapping coverage circles");
        return;
    }

    Status::info(&format!(
        "{} in {}",
        format_count(analysis.overlapping_office_count(), "office", "offices"),
        format_count(analysis.overlaps.len(), "cluster", "clusters")
    ));
    for overlap in &analysis.overlaps {
        let members: Vec<&str> = overlap.offices.iter().map(|o| o.name.as_str()).collect();
        println!(
            "  {} [{}] {}, {}",
            overlap.id.cyan(),
            join_layers(&overlap.layers),
            format_count(overlap.offices.len(), "office", "offices"),
            format_count(overlap.covered_areas.len(), "area", "areas")
        );
        println!("    {}", members.join(", ").dimmed());
    }
}

/// Print Layer-B offices found inside Layer-A circles.
pub fn print_containment(pairs: &[(&Office, &Office)]) {
    Status::header("Layer B offices inside Layer A coverage");
    if pairs.is_empty() {
        Status::info("Every Layer B office stands outside Layer A coverage");
        return;
    }

    for (office_b, office_a) in pairs {
        println!("  {} {} {}", office_b.id.cyan(), "→".dimmed(), office_a.id);
    }
    Status::info(&format_count(pairs.len(), "contained office", "contained offices"));
}
