use data_analyzer::numeric::{quantile_sorted, sorted_present};
use data_analyzer::outliers::column_outliers;
use data_analyzer::statistics::{correlation_matrix, generate_statistics};
use data_analyzer::{classify, AnalysisConfig, AnalysisReport, Column, Dataset};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        6 => (-1.0e6f64..1.0e6f64).prop_map(Some),
    ]
}

fn arb_column_values(rows: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    proptest::collection::vec(arb_value(), rows)
}

fn arb_labels(rows: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    proptest::collection::vec(
        prop_oneof![1 => Just(None), 4 => "[a-d]".prop_map(Some)],
        rows,
    )
}

/// Dataset with 0-4 numeric columns, 0-2 categorical and 0-1 unsupported
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (0usize..30).prop_flat_map(|rows| {
        (
            proptest::collection::vec(arb_column_values(rows), 0..5),
            proptest::collection::vec(arb_labels(rows), 0..3),
            any::<bool>(),
        )
            .prop_map(move |(numeric, labels, with_flags)| {
                let mut columns: Vec<Column> = numeric
                    .into_iter()
                    .enumerate()
                    .map(|(i, values)| Column::numeric(format!("n{}", i), values))
                    .collect();
                columns.extend(
                    labels
                        .into_iter()
                        .enumerate()
                        .map(|(i, values)| Column::categorical(format!("c{}", i), values)),
                );
                if with_flags {
                    columns.push(Column::unsupported("flag", "bool", rows, 0));
                }
                Dataset::new(columns).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn classification_is_disjoint_and_bounded(dataset in arb_dataset()) {
        let classification = classify(&dataset);
        prop_assert!(
            classification.numeric.len() + classification.categorical.len() <= dataset.column_count()
        );
        for name in &classification.numeric {
            prop_assert!(!classification.categorical.contains(name));
        }
    }

    #[test]
    fn correlation_matrix_symmetric_with_unit_diagonal(dataset in arb_dataset()) {
        let classification = classify(&dataset);
        let matrix = correlation_matrix(&dataset, &classification);

        if classification.numeric.is_empty() {
            prop_assert!(matrix.is_none());
        } else {
            let matrix = matrix.unwrap();
            prop_assert_eq!(matrix.len(), classification.numeric.len());
            for a in &classification.numeric {
                prop_assert_eq!(matrix[a][a], Some(1.0));
                for b in &classification.numeric {
                    prop_assert_eq!(matrix[a][b], matrix[b][a]);
                    if let Some(r) = matrix[a][b] {
                        prop_assert!((-1.0..=1.0).contains(&r));
                    }
                }
            }
        }
    }

    #[test]
    fn outlier_percentage_uses_total_rows(values in (1usize..40).prop_flat_map(arb_column_values)) {
        let rows = values.len();
        let summary = column_outliers(&values, rows, 1.5);

        prop_assert!((0.0..=100.0).contains(&summary.percentage));
        prop_assert_eq!(summary.percentage, 100.0 * summary.count as f64 / rows as f64);
    }

    #[test]
    fn fences_enclose_quartiles(values in (1usize..40).prop_flat_map(arb_column_values)) {
        let summary = column_outliers(&values, values.len(), 1.5);
        let sorted = sorted_present(&values);

        if let (Some(lower), Some(upper)) = (summary.lower_bound, summary.upper_bound) {
            let q1 = quantile_sorted(&sorted, 0.25).unwrap();
            let q3 = quantile_sorted(&sorted, 0.75).unwrap();
            prop_assert!(lower <= q1);
            prop_assert!(q1 <= q3);
            prop_assert!(q3 <= upper);
        } else {
            prop_assert!(sorted.is_empty());
        }
    }

    #[test]
    fn report_json_round_trip(dataset in arb_dataset()) {
        let classification = classify(&dataset);
        let config = AnalysisConfig::default();
        let report = AnalysisReport {
            statistics: generate_statistics(&dataset, &classification),
            outliers: data_analyzer::outliers::detect_outliers(&dataset, &classification, &config),
            insights: data_analyzer::insights::generate_insights(&dataset, &classification, &config),
        };

        let json = report.to_json().unwrap();
        prop_assert!(!json.contains("NaN"));
        prop_assert!(!json.contains("Infinity"));
        prop_assert_eq!(AnalysisReport::from_json(&json).unwrap(), report);
    }
}
