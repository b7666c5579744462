//! Integration tests for row editing and ordering checks

mod common;

use common::*;
use isisdat::{
    check_increases, row_values, DatError, DatReader, DatUnit, HtbdyUnit, Value, MAIN_ROWS,
};
use proptest::prelude::*;

const TIME: &str = HtbdyUnit::TIME;
const ELEVATION: &str = HtbdyUnit::ELEVATION;

fn boundary(times: &[f64]) -> HtbdyUnit {
    let mut unit = HtbdyUnit::new();
    for t in times {
        unit.add_row(&row_values([(ELEVATION, 1.0), (TIME, *t)]), MAIN_ROWS, None)
            .unwrap();
    }
    unit
}

fn times(unit: &HtbdyUnit) -> Vec<f64> {
    unit.row_values(TIME, MAIN_ROWS)
        .unwrap()
        .iter()
        .filter_map(Value::as_f64)
        .collect()
}

#[test]
fn test_insert_between_neighbors() {
    let mut unit = boundary(&[1.0, 3.0, 5.0]);
    unit.add_row(&row_values([(ELEVATION, 2.0), (TIME, 2.0)]), MAIN_ROWS, Some(1))
        .unwrap();
    assert_eq!(times(&unit), [1.0, 2.0, 3.0, 5.0]);
}

#[test]
fn test_insert_out_of_order_rejected() {
    let mut unit = boundary(&[1.0, 3.0, 5.0]);
    let result = unit.add_row(&row_values([(ELEVATION, 2.0), (TIME, 4.0)]), MAIN_ROWS, Some(1));
    assert!(matches!(
        result,
        Err(DatError::OrderingViolation { value, previous: Some(p), next: Some(n) })
            if value == 4.0 && p == 1.0 && n == 3.0
    ));
    assert_eq!(times(&unit), [1.0, 3.0, 5.0]);
    assert_eq!(unit.row_values(ELEVATION, MAIN_ROWS).unwrap().len(), 3);
}

#[test]
fn test_equal_value_rejected() {
    let mut unit = boundary(&[1.0, 3.0]);
    let result = unit.add_row(&row_values([(ELEVATION, 2.0), (TIME, 3.0)]), MAIN_ROWS, None);
    assert!(matches!(result, Err(DatError::OrderingViolation { .. })));
}

#[test]
fn test_nan_time_rejected() {
    let mut unit = boundary(&[1.0, 3.0, 5.0]);
    let result = unit.add_row(&row_values([(ELEVATION, 1.0), (TIME, f64::NAN)]), MAIN_ROWS, Some(1));
    assert!(matches!(result, Err(DatError::InvalidValue(_))));

    let result = unit.add_row(&row_values([(ELEVATION, 1.0), (TIME, -7.0)]), MAIN_ROWS, Some(2));
    assert!(matches!(result, Err(DatError::OrderingViolation { .. })));

    let values = row_values([(TIME, Value::from("NaN"))]);
    assert!(unit.update_row(&values, 1, MAIN_ROWS).is_err());
    assert!(unit
        .update_row(&row_values([(TIME, f64::INFINITY)]), 2, MAIN_ROWS)
        .is_err());
    assert_eq!(times(&unit), [1.0, 3.0, 5.0]);
}

#[test]
fn test_append_past_end_index() {
    let mut unit = boundary(&[1.0, 3.0]);
    unit.add_row(&row_values([(ELEVATION, 2.0), (TIME, 4.0)]), MAIN_ROWS, Some(10))
        .unwrap();
    assert_eq!(times(&unit), [1.0, 3.0, 4.0]);
}

#[test]
fn test_update_checks_both_neighbors() {
    let mut unit = boundary(&[1.0, 3.0, 5.0]);
    assert!(unit.update_row(&row_values([(TIME, 6.0)]), 1, MAIN_ROWS).is_err());
    assert!(unit.update_row(&row_values([(TIME, 0.5)]), 1, MAIN_ROWS).is_err());
    unit.update_row(&row_values([(TIME, 4.0)]), 1, MAIN_ROWS).unwrap();
    unit.update_row(&row_values([(TIME, 9.0)]), 2, MAIN_ROWS).unwrap();
    assert_eq!(times(&unit), [1.0, 4.0, 9.0]);
}

#[test]
fn test_update_rejects_whole_row() {
    let mut unit = boundary(&[1.0, 3.0, 5.0]);
    let values = row_values([(ELEVATION, 7.0), (TIME, 8.0)]);
    assert!(unit.update_row(&values, 0, MAIN_ROWS).is_err());
    assert_eq!(
        unit.row_value(ELEVATION, 0, MAIN_ROWS).unwrap(),
        Value::Float(1.0)
    );
}

#[test]
fn test_zero_is_a_lower_bound() {
    let unit = boundary(&[0.0, 2.0]);
    let column = unit.row_data_object(TIME, MAIN_ROWS).unwrap();
    assert!(check_increases(column, &Value::Float(-0.5), Some(1)).is_err());
    assert!(check_increases(column, &Value::Float(1.0), Some(1)).is_ok());
}

#[test]
fn test_unknown_column_in_row_rejected() {
    let mut unit = boundary(&[1.0]);
    let result = unit.add_row(&row_values([(ELEVATION, 2.0), (TIME, 3.0), ("flow", 4.0)]), MAIN_ROWS, None);
    assert!(matches!(result, Err(DatError::UnknownField(ref k)) if k == "flow"));
    assert_eq!(times(&unit), [1.0]);
}

#[test]
fn test_row_snapshot() {
    let mut reader = DatReader::from_lines(htbdy_lines());
    let unit = reader.consume_htbdy().unwrap();
    let row = unit.row(1, MAIN_ROWS).unwrap();
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, [ELEVATION, TIME]);
    assert_eq!(row[TIME], Value::Float(1.0));
}

#[test]
fn test_extrapolated_rows_written() {
    let mut reader = DatReader::from_lines(htbdy_lines());
    let mut unit = reader.consume_htbdy().unwrap();
    unit.add_row(&row_values([(ELEVATION, 2.9)]), MAIN_ROWS, None).unwrap();
    unit.add_row(&row_values([(ELEVATION, 2.7)]), MAIN_ROWS, None).unwrap();
    let out = unit.write();
    assert_eq!(out.len(), 8);
    assert_eq!(out[6], "     2.900     3.000");
    assert_eq!(out[7], "     2.700     4.000");
}

proptest! {
    #[test]
    fn prop_guarded_inserts_keep_order(
        inserts in prop::collection::vec(
            (
                prop_oneof![
                    8 => -100.0f64..100.0,
                    1 => Just(f64::NAN),
                    1 => Just(f64::INFINITY),
                ],
                0usize..12,
            ),
            1..40,
        )
    ) {
        let mut unit = HtbdyUnit::new();
        for (time, index) in inserts {
            let before = times(&unit).len();
            let values = row_values([(ELEVATION, 1.0), (TIME, time)]);
            match unit.add_row(&values, MAIN_ROWS, Some(index)) {
                Ok(()) => { prop_assert_eq!(times(&unit).len(), before + 1); }
                Err(_) => { prop_assert_eq!(times(&unit).len(), before); }
            }
        }
        let series = times(&unit);
        prop_assert!(series.windows(2).all(|w| w[0] < w[1]));
    }
}
