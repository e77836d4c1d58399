//! Defect-aware splitting of the tape into usable sections
//!
//! Every failed parameter marks `[start, end]` as unusable. The cuts are
//! applied one after another to the current set of sections, so a defect
//! that spans the gap between two earlier cuts trims both neighbours.

use super::result::{QualityReport, TapeSection};
use std::cmp::Ordering;

/// Remove `[start, end]` from every overlapping section in `sections`
///
/// Overlap includes touching edges. A section covered entirely is removed;
/// a section overlapped at one end is trimmed; a section containing the cut
/// strictly inside is split in two.
pub fn cut_sections(sections: &mut Vec<TapeSection>, start: f64, end: f64) {
    let mut result = Vec::with_capacity(sections.len() + 1);

    for section in sections.drain(..) {
        if !section.overlaps(start, end) {
            result.push(section);
            continue;
        }

        let covers_head = start <= section.start_position;
        let covers_tail = end >= section.end_position;

        match (covers_head, covers_tail) {
            (true, true) => {}
            (false, true) => result.push(TapeSection::new(section.start_position, start)),
            (true, false) => result.push(TapeSection::new(end, section.end_position)),
            (false, false) => {
                result.push(TapeSection::new(section.start_position, start));
                result.push(TapeSection::new(end, section.end_position));
            }
        }
    }

    *sections = result;
}

/// Defect-free sections of `tape_section` at least `min_length` long
///
/// Failures of all reports are applied in order of their start position.
/// The result is sorted by start position.
pub fn ok_sections(
    tape_section: TapeSection,
    reports: &[QualityReport],
    min_length: f64,
) -> Vec<TapeSection> {
    let mut cuts: Vec<(f64, f64)> = reports
        .iter()
        .flat_map(|r| r.fail_information.iter())
        .map(|f| (f.start_position(), f.end_position()))
        .collect();
    cuts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    log::debug!(
        "Splitting tape section {:.3}..{:.3} at {} defects, min_length={:.3}",
        tape_section.start_position,
        tape_section.end_position,
        cuts.len(),
        min_length
    );

    let mut sections = vec![tape_section];
    for (start, end) in cuts {
        cut_sections(&mut sections, start, end);
    }

    sections.retain(|s| s.length() >= min_length && s.length() >= 0.0);
    sections.sort_by(|a, b| {
        a.start_position
            .partial_cmp(&b.start_position)
            .unwrap_or(Ordering::Equal)
    });

    log::debug!("{} sections are long enough", sections.len());

    sections
}
