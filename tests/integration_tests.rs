//! Integration tests for tape quality assessment

use proptest::prelude::*;
use tape_quality::analysis::products::{
    ProductCatalog, STANDARD1, SUPERLINK_PHASE, SUPERLINK_PHASE_TEST,
};
use tape_quality::features::statistics::{piecewise_statistics, Statistic};
use tape_quality::preprocessing::tape_section::find_tape_bounds;
use tape_quality::{
    assess_tape, AssessmentConfig, AssessmentError, MeasurementSeries, TapeQualityAssessor,
    TapeQualityInformation, TapeSpecs, TestType,
};

/// Series sampled every `step` metres, value taken from the sample index
fn series_by_index(n: usize, step: f64, value: impl Fn(usize) -> f64) -> MeasurementSeries {
    let positions: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
    let values: Vec<f64> = (0..n).map(value).collect();
    MeasurementSeries::from_columns(&positions, &values).unwrap()
}

fn product(min_average: Option<f64>, min_value: f64, min_tape_length: f64) -> TapeSpecs {
    TapeSpecs {
        width: 3.0,
        min_tape_length,
        min_value,
        dropout_value: None,
        dropout_width_fn: None,
        width_from_true_baseline: false,
        min_average,
        averaging_length: Some(1.0),
        max_scatter: None,
        description: "Test product".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_ramp_tape_section() {
        // 0 → 100 → 0 over 0..10 m
        let series = series_by_index(10_001, 1e-3, |i| {
            let x = i as f64 * 1e-3;
            100.0 - 20.0 * (x - 5.0).abs()
        });

        let info = TapeQualityInformation::new(
            "ramp",
            series,
            Some(80.0),
            None,
            &AssessmentConfig::default(),
        )
        .expect("Ramp should have a tape section");

        let section = info.tape_section();
        assert!(
            (section.start_position - 3.2).abs() < 2e-3,
            "start {:.4}",
            section.start_position
        );
        assert!(
            (section.end_position - 6.8).abs() < 2e-3,
            "end {:.4}",
            section.end_position
        );
        assert!(info.dropouts().is_empty());
    }

    #[test]
    fn test_low_average_fails_average_test() {
        let series = series_by_index(2001, 1e-3, |_| 120.0);
        let spec = TapeSpecs {
            averaging_length: None,
            ..product(Some(135.0), 50.0, 0.5)
        };

        let outcome = assess_tape(series, "T-B", &spec, &AssessmentConfig::default())
            .expect("Assessment should succeed");

        let average = outcome
            .reports
            .iter()
            .find(|r| r.test_type == TestType::Average)
            .expect("Average test should run");
        assert!(!average.passed());
        assert_eq!(average.fail_information.len(), 1);
        assert!((average.fail_information[0].value() - 120.0).abs() < 1e-9);

        // the failing average covers the whole tape
        assert!(outcome.ok_sections.is_empty());
    }

    #[test]
    fn test_overlapping_dips_are_one_dropout() {
        // one defect from 3.000 to 3.014 m with two notches twelve samples apart
        let series = series_by_index(10_001, 1e-3, |i| match i {
            3001 => 60.0,
            3013 => 55.0,
            3000..=3014 => 80.0,
            _ => 150.0,
        });

        let info = TapeQualityInformation::new(
            "T-C",
            series,
            Some(150.0),
            Some(1.0),
            &AssessmentConfig::default(),
        )
        .unwrap();

        let dropouts = info.dropouts();
        assert_eq!(dropouts.len(), 1);
        assert!((dropouts[0].value() - 55.0).abs() < 1e-9);
        assert!((dropouts[0].center_position() - 3.013).abs() < 1e-9);
        assert_eq!(dropouts[0].id(), 0);
    }

    #[test]
    fn test_failed_averages_split_tape() {
        let series = series_by_index(10_001, 1e-3, |i| match i {
            4000..=5999 => 100.0,
            _ => 150.0,
        });
        let spec = product(Some(135.0), 50.0, 3.0);

        let outcome = assess_tape(series, "T-D", &spec, &AssessmentConfig::default()).unwrap();

        assert!(!outcome.passed());
        assert_eq!(outcome.ok_sections.len(), 2);
        let first = outcome.ok_sections[0];
        let second = outcome.ok_sections[1];
        assert!(first.start_position.abs() < 1e-9);
        // pieces close at the first sample past each metre
        assert!((first.end_position - 4.0).abs() < 2e-3);
        assert!((second.start_position - 6.0).abs() < 2e-3);
        assert!((second.end_position - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let make = || {
            series_by_index(20_001, 1e-3, |i| match i {
                7000..=7002 => 10.0,
                12_000..=12_030 => 60.0,
                _ => 150.0,
            })
        };
        let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE).unwrap();
        let config = AssessmentConfig::default();

        let first = assess_tape(make(), "T-I", spec, &config).unwrap();
        let second = assess_tape(make(), "T-I", spec, &config).unwrap();
        assert_eq!(first, second);

        let info = TapeQualityInformation::new(
            "T-I",
            make(),
            Some(spec.expected_average()),
            spec.averaging_length,
            &config,
        )
        .unwrap();
        let mut a = TapeQualityAssessor::new(&info, spec, &config);
        let mut b = TapeQualityAssessor::new(&info, spec, &config);
        a.assess_meets_specs();
        b.assess_meets_specs();
        assert_eq!(a.quality_reports(), b.quality_reports());
    }

    #[test]
    fn test_descending_series_matches_ascending() {
        let n = 5001;
        let value = |i: usize| match i {
            2500..=2502 => 10.0,
            _ => 150.0,
        };
        let positions: Vec<f64> = (0..n).map(|i| i as f64 * 1e-3).collect();
        let values: Vec<f64> = (0..n).map(value).collect();

        let rev_positions: Vec<f64> = positions.iter().rev().copied().collect();
        let rev_values: Vec<f64> = values.iter().rev().copied().collect();

        let spec = product(Some(135.0), 100.0, 1.0);
        let config = AssessmentConfig::default();

        let ascending = assess_tape(
            MeasurementSeries::from_columns(&positions, &values).unwrap(),
            "T",
            &spec,
            &config,
        )
        .unwrap();
        let descending = assess_tape(
            MeasurementSeries::from_columns(&rev_positions, &rev_values).unwrap(),
            "T",
            &spec,
            &config,
        )
        .unwrap();

        assert_eq!(ascending, descending);
        assert_eq!(ascending.ok_sections.len(), 2);
    }

    #[test]
    fn test_superlink_dropout_leaves_no_long_section() {
        // 60 m of tape with one deep drop-out in the middle
        let series = series_by_index(60_001, 1e-3, |i| match i {
            30_000..=30_002 => 10.0,
            _ => 150.0,
        });
        let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE_TEST).unwrap();

        let outcome = assess_tape(series, "SL-1", spec, &AssessmentConfig::default()).unwrap();

        let dropout = outcome
            .reports
            .iter()
            .find(|r| r.test_type == TestType::DropOut)
            .expect("SuperLink products run the drop-out test");
        assert_eq!(dropout.fail_information.len(), 1);
        assert!(dropout.to_string().contains("Failed due to: Drop Out"));

        // both halves are shorter than the 50 m minimum
        assert!(outcome.ok_sections.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_standard_tape_without_average_spec() {
        let series = series_by_index(6001, 5e-3, |_| 750.0);
        let spec = ProductCatalog::builtin().get(STANDARD1).unwrap();

        let outcome = assess_tape(series, "STD-1", spec, &AssessmentConfig::default()).unwrap();

        assert!(outcome.passed());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].test_type, TestType::Minimum);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].contains("Average Value"));
        assert_eq!(outcome.ok_sections.len(), 1);
        assert!((outcome.ok_length() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_product_baseline_setting_and_config_override() {
        // plateau at 200 A while the product expects 135 A, one 3 mm dip to 50 A
        let make = || {
            series_by_index(5001, 1e-3, |i| match i {
                2500..=2502 => 50.0,
                _ => 200.0,
            })
        };
        let spec = TapeSpecs {
            width_from_true_baseline: true,
            ..product(Some(135.0), 100.0, 1.0)
        };
        assert!((spec.expected_average() - 135.0).abs() < 1e-9);

        let dropout_width = |config: &AssessmentConfig| {
            let outcome = assess_tape(make(), "T-W", &spec, config).unwrap();
            let minimum = outcome
                .reports
                .iter()
                .find(|r| r.test_type == TestType::Minimum)
                .expect("Minimum test should run");
            assert_eq!(minimum.fail_information.len(), 1);
            minimum.fail_information[0].width()
        };

        let from_product = dropout_width(&AssessmentConfig::default());
        let forced_true = dropout_width(&AssessmentConfig {
            use_true_baseline: Some(true),
            ..AssessmentConfig::default()
        });
        let forced_false = dropout_width(&AssessmentConfig {
            use_true_baseline: Some(false),
            ..AssessmentConfig::default()
        });

        // local average ~199.55 A: half maximum ~124.8 A
        assert!((from_product - 0.002997).abs() < 1e-5, "width {}", from_product);
        assert_eq!(from_product, forced_true);
        // expected average 135 A: half maximum 92.5 A
        assert!((forced_false - 0.0025667).abs() < 1e-5, "width {}", forced_false);
        assert!(from_product - forced_false > 3e-4);
    }

    #[test]
    fn test_no_tape_is_an_error() {
        let series = series_by_index(1000, 1e-3, |_| 5.0);
        let spec = ProductCatalog::builtin().get(SUPERLINK_PHASE).unwrap();

        let result = assess_tape(series, "empty", spec, &AssessmentConfig::default());
        assert!(matches!(result, Err(AssessmentError::NoTapeFound(_))));
    }

    #[test]
    fn test_outcome_serializes_to_json() {
        let series = series_by_index(5001, 1e-3, |i| if i == 2500 { 10.0 } else { 150.0 });
        let spec = product(Some(135.0), 100.0, 1.0);
        let outcome = assess_tape(series, "J", &spec, &AssessmentConfig::default()).unwrap();

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""tape_id":"J""#));
        assert!(json.contains(r#""kind":"Peak""#));
    }
}

proptest! {
    #[test]
    fn prop_piecewise_intervals_cover_tape_section(
        n in 2usize..400,
        spacing in 1e-3_f64..0.1,
        piece_length in 1e-3_f64..5.0,
    ) {
        let series = series_by_index(n, spacing, |i| 100.0 + (i % 7) as f64);
        let bounds = find_tape_bounds(&series, 50.0).unwrap();

        let averages =
            piecewise_statistics(&series, &bounds, Statistic::Average, Some(piece_length)).unwrap();

        prop_assert!(!averages.is_empty());
        prop_assert_eq!(averages[0].start_position(), bounds.section.start_position);
        prop_assert_eq!(
            averages[averages.len() - 1].end_position(),
            bounds.section.end_position
        );
        for (i, pair) in averages.windows(2).enumerate() {
            prop_assert_eq!(pair[0].end_position(), pair[1].start_position());
            prop_assert_eq!(pair[0].id(), i);
        }
    }
}
