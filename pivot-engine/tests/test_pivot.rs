//! FILENAME: tests/test_pivot.rs
//! Integration tests for category x period pivot calculation.

use pivot_engine::{build_pivot, MetricMode, PeriodMode, PivotDefinition, PivotView};
use tabular::{Frame, YearMonth, MONTH_COLUMN, YEAR_COLUMN};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Export records per country over three years. The reference period is
/// (2025, 5); the extra early-month records only matter for YearToDate,
/// and the record with a null country must never surface.
fn country_frame() -> Frame {
    let rows: Vec<(i64, i64, Option<&str>, f64)> = vec![
        (2023, 5, Some("Argentina"), 100.0),
        (2023, 5, Some("EUA"), 300.0),
        (2023, 5, Some("Chile"), 50.0),
        (2024, 5, Some("Argentina"), 150.0),
        (2024, 5, Some("EUA"), 330.0),
        (2024, 5, Some("Chile"), 40.0),
        (2025, 5, Some("Argentina"), 180.0),
        (2025, 5, Some("EUA"), 360.0),
        (2025, 5, Some("Chile"), 60.0),
        (2025, 3, Some("Argentina"), 20.0),
        (2025, 2, Some("EUA"), 10.0),
        (2025, 5, None, 999.0),
    ];

    Frame::builder()
        .int(YEAR_COLUMN, rows.iter().map(|r| r.0).collect())
        .int(MONTH_COLUMN, rows.iter().map(|r| r.1).collect())
        .text(
            "pais",
            rows.iter().map(|r| r.2.map(String::from)).collect(),
        )
        .number("valor", rows.iter().map(|r| r.3).collect())
        .build()
        .unwrap()
}

fn country_definition() -> PivotDefinition {
    PivotDefinition::new("valor", "pais").with_row_label("País")
}

fn row_labels(view: &PivotView) -> Vec<&str> {
    view.rows.iter().map(|r| r.label.as_str()).collect()
}

// ============================================================================
// ABSOLUTE PIVOT TESTS
// ============================================================================

#[test]
fn test_absolute_pivot_shape_and_labels() {
    let view = build_pivot(&country_definition(), &country_frame()).unwrap();

    assert_eq!(view.row_label, "País");
    assert_eq!(view.columns, vec!["Mai/23", "Mai/24", "Mai/25"]);
    assert_eq!(view.rows.len(), 3);
}

#[test]
fn test_rows_ranked_by_latest_column_descending() {
    let view = build_pivot(&country_definition(), &country_frame()).unwrap();

    assert_eq!(row_labels(&view), vec!["EUA", "Argentina", "Chile"]);
    assert_eq!(view.cell("EUA", "Mai/25"), Some(360.0));
    assert_eq!(view.cell("Chile", "Mai/23"), Some(50.0));
}

#[test]
fn test_single_period_ignores_other_months() {
    let view = build_pivot(&country_definition(), &country_frame()).unwrap();

    // The March and February 2025 records are outside the window.
    assert_eq!(view.cell("Argentina", "Mai/25"), Some(180.0));
    assert_eq!(view.cell("EUA", "Mai/25"), Some(360.0));
}

#[test]
fn test_year_to_date_accumulates_through_reference_month() {
    let definition = country_definition().with_period_mode(PeriodMode::YearToDate);
    let view = build_pivot(&definition, &country_frame()).unwrap();

    assert_eq!(
        view.columns,
        vec!["Jan-Mai/23", "Jan-Mai/24", "Jan-Mai/25"]
    );
    assert_eq!(view.cell("Argentina", "Jan-Mai/25"), Some(200.0));
    assert_eq!(view.cell("EUA", "Jan-Mai/25"), Some(370.0));
}

#[test]
fn test_null_categories_are_dropped() {
    let view = build_pivot(&country_definition(), &country_frame()).unwrap();

    let total_2025: f64 = view
        .rows
        .iter()
        .filter_map(|r| r.cells.last().copied().flatten())
        .sum();
    assert!((total_2025 - 600.0).abs() < 1e-9);
}

#[test]
fn test_missing_cells_fill_with_zero() {
    let frame = Frame::builder()
        .int(YEAR_COLUMN, vec![2024, 2025])
        .int(MONTH_COLUMN, vec![5, 5])
        .text("pais", vec![Some("Peru".into()), Some("Bolívia".into())])
        .number("valor", vec![70.0, 90.0])
        .build()
        .unwrap();

    let view = build_pivot(&country_definition(), &frame).unwrap();
    assert_eq!(view.cell("Peru", "Mai/25"), Some(0.0));
    assert_eq!(view.cell("Bolívia", "Mai/24"), Some(0.0));
}

#[test]
fn test_reference_override() {
    let definition = country_definition().with_reference(YearMonth::new(2024, 5));
    let view = build_pivot(&definition, &country_frame()).unwrap();

    assert_eq!(view.columns, vec!["Mai/23", "Mai/24", "Mai/25"]);
    assert_eq!(view.cell("Argentina", "Mai/24"), Some(150.0));
}

// ============================================================================
// SHARE-OF-TOTAL TESTS
// ============================================================================

#[test]
fn test_share_columns_sum_to_one_hundred() {
    let definition = country_definition().with_metric_mode(MetricMode::ShareOfTotal);
    let view = build_pivot(&definition, &country_frame()).unwrap();

    for col in &view.columns {
        let sum: f64 = view
            .rows
            .iter()
            .filter_map(|r| view.cell(&r.label, col))
            .sum();
        assert!((sum - 100.0).abs() < 0.1, "column {col} sums to {sum}");
    }
}

#[test]
fn test_share_preserves_absolute_ranking() {
    let definition = country_definition().with_metric_mode(MetricMode::ShareOfTotal);
    let view = build_pivot(&definition, &country_frame()).unwrap();

    // Ranking is frozen on the absolute values, not on the shares.
    assert_eq!(row_labels(&view), vec!["EUA", "Argentina", "Chile"]);
    let eua = view.cell("EUA", "Mai/25").unwrap();
    assert!((eua - 60.0).abs() < 1e-9);
}

#[test]
fn test_share_undefined_for_zero_column_total() {
    let frame = Frame::builder()
        .int(YEAR_COLUMN, vec![2024, 2024, 2025, 2025])
        .int(MONTH_COLUMN, vec![5, 5, 5, 5])
        .text(
            "pais",
            vec![
                Some("Argentina".into()),
                Some("Chile".into()),
                Some("Argentina".into()),
                Some("Chile".into()),
            ],
        )
        .number("valor", vec![30.0, -30.0, 80.0, 20.0])
        .build()
        .unwrap();

    let definition = country_definition().with_metric_mode(MetricMode::ShareOfTotal);
    let view = build_pivot(&definition, &frame).unwrap();

    assert_eq!(view.cell("Argentina", "Mai/24"), None);
    assert_eq!(view.cell("Argentina", "Mai/25"), Some(80.0));
}

// ============================================================================
// PERIOD-CHANGE TESTS
// ============================================================================

#[test]
fn test_period_change_drops_first_column() {
    let definition = country_definition().with_metric_mode(MetricMode::PeriodChange);
    let view = build_pivot(&definition, &country_frame()).unwrap();

    assert_eq!(view.columns, vec!["Mai/24", "Mai/25"]);
    let argentina_24 = view.cell("Argentina", "Mai/24").unwrap();
    let argentina_25 = view.cell("Argentina", "Mai/25").unwrap();
    assert!((argentina_24 - 50.0).abs() < 1e-9);
    assert!((argentina_25 - 20.0).abs() < 1e-9);
}

#[test]
fn test_period_change_undefined_for_zero_base() {
    let frame = Frame::builder()
        .int(YEAR_COLUMN, vec![2024, 2025, 2025])
        .int(MONTH_COLUMN, vec![5, 5, 5])
        .text(
            "pais",
            vec![
                Some("Argentina".into()),
                Some("Argentina".into()),
                Some("Chile".into()),
            ],
        )
        .number("valor", vec![100.0, 120.0, 60.0])
        .build()
        .unwrap();

    let definition = country_definition().with_metric_mode(MetricMode::PeriodChange);
    let view = build_pivot(&definition, &frame).unwrap();

    assert!(view.cell("Argentina", "Mai/25").is_some());
    // Chile has no 2024 records, so its base is the 0-filled cell.
    assert_eq!(view.cell("Chile", "Mai/25"), None);
}

#[test]
fn test_period_change_with_single_year_is_empty() {
    let frame = Frame::builder()
        .int(YEAR_COLUMN, vec![2025, 2025])
        .int(MONTH_COLUMN, vec![5, 5])
        .text(
            "pais",
            vec![Some("Argentina".into()), Some("Chile".into())],
        )
        .number("valor", vec![10.0, 20.0])
        .build()
        .unwrap();

    let definition = country_definition().with_metric_mode(MetricMode::PeriodChange);
    let view = build_pivot(&definition, &frame).unwrap();

    assert!(view.is_empty());
    assert_eq!(view.column_count(), 0);
}

// ============================================================================
// EDGE CASES AND SERIALIZATION
// ============================================================================

#[test]
fn test_empty_frame_yields_empty_view() {
    let view = build_pivot(&country_definition(), &Frame::empty()).unwrap();

    assert!(view.is_empty());
    assert_eq!(view.row_label, "País");
}

#[test]
fn test_all_null_categories_yield_empty_view() {
    let frame = Frame::builder()
        .int(YEAR_COLUMN, vec![2025])
        .int(MONTH_COLUMN, vec![5])
        .text("pais", vec![None])
        .number("valor", vec![42.0])
        .build()
        .unwrap();

    let view = build_pivot(&country_definition(), &frame).unwrap();
    assert!(view.is_empty());
}

#[test]
fn test_missing_value_column_is_an_error() {
    let definition = PivotDefinition::new("pares", "pais");
    assert!(build_pivot(&definition, &country_frame()).is_err());
}

#[test]
fn test_definition_round_trips_through_json() {
    let definition = country_definition()
        .with_period_mode(PeriodMode::YearToDate)
        .with_metric_mode(MetricMode::ShareOfTotal)
        .with_reference(YearMonth::new(2025, 5));

    let json = serde_json::to_string(&definition).unwrap();
    let back: PivotDefinition = serde_json::from_str(&json).unwrap();

    assert_eq!(back.value_column, "valor");
    assert_eq!(back.period_mode, PeriodMode::YearToDate);
    assert_eq!(back.metric_mode, MetricMode::ShareOfTotal);
    assert_eq!(back.reference, Some(YearMonth::new(2025, 5)));
}

#[test]
fn test_view_round_trips_through_json() {
    let view = build_pivot(&country_definition(), &country_frame()).unwrap();

    let json = serde_json::to_string(&view).unwrap();
    let back: PivotView = serde_json::from_str(&json).unwrap();

    assert_eq!(view, back);
}
