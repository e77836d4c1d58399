//! Example: Assess a synthetic tape
//!
//! Builds a 220 m SuperLink phase tape in memory, assesses it against the
//! built-in product and prints the reports and usable sections.

use tape_quality::analysis::products::{ProductCatalog, SUPERLINK_PHASE};
use tape_quality::{assess_tape, AssessmentConfig, MeasurementSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    // Lead-in and lead-out without tape, one deep and one wide drop-out
    let n = 230_001;
    let positions: Vec<f64> = (0..n).map(|i| i as f64 * 1e-3).collect();
    let values: Vec<f64> = (0..n)
        .map(|i| match i {
            0..=4_999 | 225_001.. => 0.5,
            20_000..=20_003 => 12.0,
            222_000..=222_040 => 70.0,
            _ => 148.0 + 4.0 * (i as f64 * 2e-3).sin(),
        })
        .collect();
    let series = MeasurementSeries::from_columns(&positions, &values)?;

    let catalog = ProductCatalog::builtin();
    let spec = catalog
        .get(SUPERLINK_PHASE)
        .ok_or("SuperLink phase product missing from catalog")?;

    let outcome = assess_tape(series, "DEMO-001", spec, &AssessmentConfig::default())?;

    // Print results
    println!("Assessment of {} against {}:", outcome.tape_id, spec.description);
    println!(
        "  Tape section: {:.2} m .. {:.2} m",
        outcome.tape_section.start_position, outcome.tape_section.end_position
    );
    for report in &outcome.reports {
        println!("{}", report);
    }
    println!("OK sections (min {:.0} m):", spec.min_tape_length);
    for section in &outcome.ok_sections {
        println!(
            "  {:.2} m .. {:.2} m ({:.2} m)",
            section.start_position,
            section.end_position,
            section.length()
        );
    }
    for diagnostic in &outcome.diagnostics {
        println!("  Note: {}", diagnostic);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
