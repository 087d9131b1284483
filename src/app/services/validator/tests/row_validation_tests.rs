//! Tests for per-row validation

use super::*;
use crate::app::models::{CsvRow, FieldMapping, TargetField};
use crate::app::services::row_parser::{RowParser, SegmentKeywords};
use crate::app::services::validator::{is_valid_email, validate_row};

fn contact_mappings() -> Vec<FieldMapping> {
    vec![
        mapping("Company", TargetField::OrganizationName, 89),
        mapping("Contact", TargetField::ContactName, 88),
        mapping("Email", TargetField::ContactEmail, 90),
    ]
}

#[test]
fn test_valid_row() {
    let row = CsvRow::from_pairs(
        1,
        [
            ("Company", "Acme"),
            ("Contact", "Jane Doe"),
            ("Email", "jane@acme.example"),
        ],
    );

    let result = validate_row(&row, &contact_mappings());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_blank_organization_name_is_error() {
    let row = CsvRow::from_pairs(7, [("Company", "   "), ("Contact", "Jane Doe")]);

    let result = validate_row(&row, &contact_mappings());
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, Some(TargetField::OrganizationName));
    assert_eq!(result.errors[0].column.as_deref(), Some("Company"));
    assert!(result.errors[0].message.contains("Row 7"));
}

#[test]
fn test_unmapped_organization_name_is_error() {
    let mappings = vec![mapping("Contact", TargetField::ContactName, 88)];
    let row = CsvRow::from_pairs(1, [("Contact", "Jane Doe")]);

    assert!(!validate_row(&row, &mappings).is_valid());
}

#[test]
fn test_bad_email_is_warning_not_error() {
    let mappings = contact_mappings();
    let row = CsvRow::from_pairs(
        2,
        [
            ("Company", "Acme"),
            ("Contact", "Smith, John"),
            ("Email", "bad-email"),
        ],
    );

    let result = validate_row(&row, &mappings);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].field, Some(TargetField::ContactEmail));
    assert!(result.warnings[0].message.contains("bad-email"));

    // the contact is still parsed with a split name
    let parsed = RowParser::new(&mappings, SegmentKeywords::builtin()).parse(&row);
    assert_eq!(parsed.contacts[0].first_name, "John");
    assert_eq!(parsed.contacts[0].last_name, "Smith");
}

#[test]
fn test_blank_email_is_not_checked() {
    let row = CsvRow::from_pairs(1, [("Company", "Acme"), ("Email", "  ")]);

    let result = validate_row(&row, &contact_mappings());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_is_valid_email() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email(" first.last+tag@mail.example.org "));

    assert!(!is_valid_email("bad-email"));
    assert!(!is_valid_email("no@tld"));
    assert!(!is_valid_email("two@@signs.com"));
    assert!(!is_valid_email("spa ce@x.com"));
    assert!(!is_valid_email(""));
}
