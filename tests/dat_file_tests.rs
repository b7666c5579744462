//! Integration tests for reading and writing whole `.dat` files

mod common;

use common::*;
use isisdat::{
    row_values, CommentUnit, DatError, DatReader, DatUnit, DatWriter, DatWriterConfiguration,
    HeaderUnit, LineEnding, Unit, UnitIdGenerator, UnknownUnit, Value, MAIN_ROWS,
};
use std::fs;

#[test]
fn test_read_heterogeneous_units() {
    let mut reader = DatReader::from_lines(model_lines());
    let header = reader.consume_header().unwrap();
    assert_eq!(reader.position(), 7);
    let comment = reader.consume_comment().unwrap();
    assert_eq!(reader.position(), 11);
    let htbdy = reader.consume_htbdy().unwrap();
    assert_eq!(reader.position(), 17);
    let river = reader.consume_unknown(reader.remaining()).unwrap();
    assert!(reader.is_finished());

    assert_eq!(header.node_count(), 12);
    assert_eq!(comment.row_count(), 2);
    assert_eq!(htbdy.name(), "DS_BDY");
    assert_eq!(htbdy.number_of_rows(MAIN_ROWS).unwrap(), 3);
    assert_eq!(river.lines(), river_lines().as_slice());
}

#[test]
fn test_untouched_model_round_trips() {
    let mut reader = DatReader::from_lines(model_lines());
    let units = read_model(&mut reader).unwrap();
    assert_eq!(write_all(&units), model_lines());
    assert_eq!(DatWriter::new().write_lines(&units), model_lines());
}

#[test]
fn test_fallback_names_are_unique_within_reader() {
    let mut text = comment_lines();
    text.extend(comment_lines());
    text.extend(river_lines());
    let mut reader = DatReader::from_lines(text);
    let first = reader.consume_comment().unwrap();
    let second = reader.consume_comment().unwrap();
    let river = reader.consume_unknown(reader.remaining()).unwrap();
    assert_eq!(first.name(), "comment_1");
    assert_eq!(second.name(), "comment_2");
    assert_eq!(river.name(), "unknown_3");
}

#[test]
fn test_edit_then_write() {
    let mut reader = DatReader::from_lines(model_lines());
    let mut units = read_model(&mut reader).unwrap();

    if let Unit::Header(header) = &mut units[0] {
        header.set_field("node_count", 13).unwrap();
    }
    if let Unit::Htbdy(htbdy) = &mut units[2] {
        htbdy.delete_row(2, MAIN_ROWS).unwrap();
    }

    let out = write_all(&units);
    assert!(out[2].starts_with("        13"));
    assert_eq!(out.len(), model_lines().len() - 1);
    assert!(out[13].starts_with("         2"));
    assert_eq!(out[out.len() - 7..], river_lines()[..]);
}

#[test]
fn test_copy_is_independent() {
    let mut reader = DatReader::from_lines(htbdy_lines());
    let mut original = reader.consume_htbdy().unwrap();
    let mut copy = original.copy();

    copy.set_name("US_BDY".to_string());
    copy.update_row(&row_values([("elevation", 9.0)]), 0, MAIN_ROWS)
        .unwrap();
    copy.add_row(&row_values([("elevation", 2.0), ("time", 3.0)]), MAIN_ROWS, None)
        .unwrap();
    copy.delete_row(1, MAIN_ROWS).unwrap();

    assert_eq!(original.name(), "DS_BDY");
    assert_eq!(
        original.row_value("elevation", 0, MAIN_ROWS).unwrap(),
        Value::Float(2.5)
    );
    assert_eq!(original.write(), htbdy_lines());
    let copy_lines = copy.write();

    original
        .add_row(&row_values([("elevation", 2.0), ("time", 5.0)]), MAIN_ROWS, None)
        .unwrap();
    original.delete_row(0, MAIN_ROWS).unwrap();
    original
        .update_row(&row_values([("elevation", 4.0)]), 0, MAIN_ROWS)
        .unwrap();

    assert_eq!(copy.write(), copy_lines);
    assert_eq!(copy.name(), "US_BDY");
    assert_eq!(
        copy.row_values("time", MAIN_ROWS).unwrap(),
        [Value::Float(0.0), Value::Float(2.0), Value::Float(3.0)]
    );
}

#[test]
fn test_comment_append_and_count() {
    let mut reader = DatReader::from_lines(comment_lines());
    let mut comment = reader.consume_comment().unwrap();
    comment.add_comment_text("  Checked 2024  ");
    assert_eq!(comment.row_count(), 3);
    let out = comment.write();
    assert_eq!(out.len(), 5);
    assert_eq!(out[1], "         3");
    assert_eq!(out[4], "Checked 2024");
}

#[test]
fn test_comment_count_truncates_output() {
    let mut comment = CommentUnit::with_text(&mut UnitIdGenerator::new(), "a\nb\nc");
    comment.set_row_count(1);
    assert_eq!(comment.write(), ["COMMENT   ", "         1", "a"]);
}

#[test]
fn test_row_access_on_unit_without_rows() {
    let header = HeaderUnit::new();
    assert!(matches!(
        header.row(0, MAIN_ROWS),
        Err(DatError::NotApplicable { ref unit_type }) if unit_type == "header"
    ));

    let mut unknown = UnknownUnit::new(&mut UnitIdGenerator::new());
    assert!(matches!(
        unknown.delete_row(0, MAIN_ROWS),
        Err(DatError::NotApplicable { .. })
    ));
}

#[test]
fn test_unknown_field_lookup() {
    let mut reader = DatReader::from_lines(htbdy_lines());
    let htbdy = reader.consume_htbdy().unwrap();
    let err = htbdy.row_values("chainage", MAIN_ROWS).unwrap_err();
    assert!(matches!(err, DatError::UnknownField(ref k) if k == "chainage"));
    assert!(err.to_string().contains("chainage"));
}

#[test]
fn test_row_index_out_of_range() {
    let mut reader = DatReader::from_lines(htbdy_lines());
    let mut htbdy = reader.consume_htbdy().unwrap();
    assert!(matches!(
        htbdy.row_value("time", 3, MAIN_ROWS),
        Err(DatError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(htbdy.delete_row(7, MAIN_ROWS).is_err());
    assert_eq!(htbdy.number_of_rows(MAIN_ROWS).unwrap(), 3);
}

#[test]
fn test_file_round_trip_crlf() {
    let mut reader = DatReader::from_lines(model_lines());
    let units = read_model(&mut reader).unwrap();

    let path = std::env::temp_dir().join("isisdat_file_round_trip.dat");
    DatWriter::new().write_to_file(&units, &path).unwrap();
    let bytes = fs::read(&path).unwrap();
    let reread = DatReader::from_file(&path);
    let _ = fs::remove_file(&path);

    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, model_lines().join("\r\n") + "\r\n");

    let mut reader = reread.unwrap();
    let units = read_model(&mut reader).unwrap();
    assert_eq!(write_all(&units), model_lines());
}

#[test]
fn test_lf_output() {
    let units = vec![Unit::from(HeaderUnit::new())];
    let writer = DatWriter::new().with_configuration(DatWriterConfiguration {
        line_ending: LineEnding::Lf,
        ..Default::default()
    });
    let text = String::from_utf8(writer.write_to_vec(&units).unwrap()).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(!text.contains('\r'));
}

#[test]
fn test_reader_from_nonexistent_file() {
    let result = DatReader::from_file("nonexistent.dat");
    assert!(matches!(result, Err(DatError::Io(_))));
}
