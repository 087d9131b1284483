//! Tests for segment, type and priority inference

use crate::app::models::{CsvRow, OrganizationType, Priority, Segment};
use crate::app::services::row_parser::{
    SegmentKeywords, detect_organization_type, normalize_priority,
};
use crate::config::ClassificationConfig;

#[test]
fn test_segment_from_name_keywords() {
    let keywords = SegmentKeywords::builtin();

    assert_eq!(keywords.detect(None, "Tony's Pizzeria"), Segment::Restaurant);
    assert_eq!(keywords.detect(None, "Unique Widgets Inc"), Segment::General);
    assert_eq!(
        keywords.detect(None, "Lincoln High School"),
        Segment::Institutional
    );
    assert_eq!(keywords.detect(None, "Corner Market"), Segment::Retail);
    assert_eq!(keywords.detect(None, "Seaside Hotel"), Segment::Hospitality);
}

#[test]
fn test_segment_keywords_match_whole_tokens_and_plurals() {
    let keywords = SegmentKeywords::builtin();

    // plural form of "burger"
    assert_eq!(keywords.detect(None, "Bob's Burgers"), Segment::Restaurant);
    // "bar" must not match inside "Barton"
    assert_eq!(keywords.detect(None, "Barton Industries"), Segment::General);
}

#[test]
fn test_segment_priority_order() {
    let keywords = SegmentKeywords::builtin();

    // restaurant wins over hospitality
    assert_eq!(keywords.detect(None, "Hotel Bar & Grill"), Segment::Restaurant);
    // institutional wins over retail
    assert_eq!(keywords.detect(None, "Campus Store"), Segment::Institutional);
}

#[test]
fn test_explicit_segment_wins() {
    let keywords = SegmentKeywords::builtin();

    assert_eq!(
        keywords.detect(Some("retail"), "Tony's Pizzeria"),
        Segment::Retail
    );
    // unknown labels fall back to name detection
    assert_eq!(
        keywords.detect(Some("Food Service"), "Tony's Pizzeria"),
        Segment::Restaurant
    );
}

#[test]
fn test_configured_keywords() {
    let config = ClassificationConfig {
        extra_hospitality_keywords: vec!["Hostel".to_string()],
        ..Default::default()
    };
    let keywords = SegmentKeywords::from_config(&config);

    assert_eq!(keywords.detect(None, "Harbor Hostel"), Segment::Hospitality);
    assert!(
        keywords
            .keywords(Segment::Hospitality)
            .contains(&"hostel".to_string())
    );
}

#[test]
fn test_empty_keywords_classify_general() {
    let keywords = SegmentKeywords::empty();
    assert_eq!(keywords.detect(None, "Tony's Pizzeria"), Segment::General);
}

#[test]
fn test_distributor_flag_column() {
    for value in ["yes", "Y", " TRUE ", "1", "x", "Distributor"] {
        let row = CsvRow::from_pairs(1, [("Name", "Acme"), ("Is Distributor?", value)]);
        assert_eq!(
            detect_organization_type(None, &row),
            OrganizationType::Distributor,
            "value {:?}",
            value
        );
    }

    let row = CsvRow::from_pairs(1, [("Name", "Acme"), ("Distributor", "no")]);
    assert_eq!(
        detect_organization_type(None, &row),
        OrganizationType::Customer
    );
}

#[test]
fn test_affirmative_value_needs_distributor_header() {
    let row = CsvRow::from_pairs(1, [("Name", "Acme"), ("Active", "yes")]);
    assert_eq!(
        detect_organization_type(None, &row),
        OrganizationType::Customer
    );
}

#[test]
fn test_explicit_type_wins() {
    let row = CsvRow::from_pairs(1, [("Distributor", "yes")]);

    assert_eq!(
        detect_organization_type(Some("Principal"), &row),
        OrganizationType::Principal
    );
    assert_eq!(
        detect_organization_type(Some("wholesale"), &row),
        OrganizationType::Distributor
    );
}

#[test]
fn test_normalize_priority() {
    assert_eq!(normalize_priority(Some("a")), Priority::A);
    assert_eq!(normalize_priority(Some(" b ")), Priority::B);
    assert_eq!(normalize_priority(Some("D")), Priority::D);
    assert_eq!(normalize_priority(Some("E")), Priority::C);
    assert_eq!(normalize_priority(Some("high")), Priority::C);
    assert_eq!(normalize_priority(Some("")), Priority::C);
    assert_eq!(normalize_priority(None), Priority::C);
}
