use todo_core::{decode_records, encode_records, RecordError, TodoItem, TodoValidationError};

#[test]
fn encode_then_decode_preserves_order_and_fields() {
    let items = vec![
        TodoItem::with_created_at("buy milk", false, 1_700_000_000),
        TodoItem::with_created_at("pay | rent | today", true, 0),
        TodoItem::with_created_at("", false, 42),
        TodoItem::with_created_at("  padded  ", true, 1_999_999_999),
        TodoItem::with_created_at("naïve café ✓", false, 7),
    ];

    let encoded = encode_records(&items).unwrap();
    let report = decode_records(&encoded);

    assert_eq!(report.items, items);
    assert!(report.skipped.is_empty());
}

#[test]
fn encode_records_writes_one_terminated_line_per_item() {
    let items = vec![
        TodoItem::with_created_at("first", true, 10),
        TodoItem::with_created_at("second", false, 20),
    ];

    assert_eq!(encode_records(&items).unwrap(), b"1|10|first\n0|20|second\n");
    assert!(encode_records(&[]).unwrap().is_empty());
}

#[test]
fn encode_records_rejects_multiline_text_with_position() {
    let items = vec![
        TodoItem::with_created_at("ok", false, 1),
        TodoItem::with_created_at("bad\ntext", false, 2),
    ];

    let err = encode_records(&items).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.source, TodoValidationError::MultilineText);
}

#[test]
fn malformed_lines_are_skipped_without_aborting_load() {
    let input = "1|1700000000|well formed\nno delimiters here\n0|later|bad stamp\n0|5|tail\n";

    let report = decode_records(input);

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[0].text, "well formed");
    assert_eq!(report.items[1].text, "tail");

    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].reason, RecordError::MissingDelimiter);
    assert_eq!(report.skipped[1].line, 3);
    assert!(matches!(
        report.skipped[1].reason,
        RecordError::InvalidTimestamp { .. }
    ));
}

#[test]
fn one_good_line_and_one_line_without_pipes_yields_one_item() {
    let report = decode_records("0|100|keep me\ngarbage\n");

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].text, "keep me");
    assert_eq!(report.items[0].created_at, 100);
}

#[test]
fn carriage_returns_stay_in_text_and_save_back_unchanged() {
    let input = b"0|1|a\rb\n1|2|windows\r\n\r\n\n0|3|last".to_vec();

    let report = decode_records(&input);

    assert!(report.skipped.is_empty());
    assert_eq!(report.items.len(), 3);
    assert_eq!(report.items[0].text, "a\rb");
    assert_eq!(report.items[1].text, "windows\r");
    assert_eq!(report.items[2].text, "last");

    let encoded = encode_records(&report.items).unwrap();
    assert_eq!(encoded, b"0|1|a\rb\n1|2|windows\r\n0|3|last\n");
}

#[test]
fn non_utf8_text_bytes_roundtrip_verbatim() {
    let input = b"0|1|caf\xE9 \xFF|x\n".to_vec();

    let report = decode_records(&input);

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].text.as_bytes(), b"caf\xE9 \xFF|x");
    assert_eq!(encode_records(&report.items).unwrap(), input);
}

#[test]
fn non_utf8_timestamp_is_reported_as_invalid() {
    let report = decode_records(b"0|1\xFF|text\n".to_vec());

    assert!(report.items.is_empty());
    assert!(matches!(
        report.skipped[0].reason,
        RecordError::InvalidTimestamp { .. }
    ));
}
