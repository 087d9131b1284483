//! Segment, organization type and priority inference

use crate::app::models::{CsvRow, OrganizationType, Priority, Segment};
use crate::app::services::field_mapper::normalize_header;
use crate::config::ClassificationConfig;
use crate::constants::{AFFIRMATIVE_VALUES, DISTRIBUTOR_HEADER_MARKER, segment_keywords};

/// Segment keyword lists in detection priority order
///
/// Keywords are stored normalized. A keyword matches an organization name
/// when it appears on token boundaries, either as-is or with a trailing `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentKeywords {
    lists: Vec<(Segment, Vec<String>)>,
}

impl SegmentKeywords {
    /// Lists with no keywords; every name classifies as General
    pub fn empty() -> Self {
        Self {
            lists: vec![
                (Segment::Restaurant, Vec::new()),
                (Segment::Institutional, Vec::new()),
                (Segment::Retail, Vec::new()),
                (Segment::Hospitality, Vec::new()),
            ],
        }
    }

    /// Built-in keyword lists
    pub fn builtin() -> Self {
        Self::empty()
            .with_keywords(Segment::Restaurant, segment_keywords::RESTAURANT)
            .with_keywords(Segment::Institutional, segment_keywords::INSTITUTIONAL)
            .with_keywords(Segment::Retail, segment_keywords::RETAIL)
            .with_keywords(Segment::Hospitality, segment_keywords::HOSPITALITY)
    }

    /// Built-in lists extended with configured keywords
    pub fn from_config(config: &ClassificationConfig) -> Self {
        fn extra(list: &[String]) -> Vec<&str> {
            list.iter().map(String::as_str).collect()
        }

        Self::builtin()
            .with_keywords(
                Segment::Restaurant,
                &extra(&config.extra_restaurant_keywords),
            )
            .with_keywords(
                Segment::Institutional,
                &extra(&config.extra_institutional_keywords),
            )
            .with_keywords(Segment::Retail, &extra(&config.extra_retail_keywords))
            .with_keywords(
                Segment::Hospitality,
                &extra(&config.extra_hospitality_keywords),
            )
    }

    /// Append keywords to one segment's list
    pub fn with_keywords(mut self, segment: Segment, keywords: &[&str]) -> Self {
        if let Some((_, list)) = self.lists.iter_mut().find(|(s, _)| *s == segment) {
            for keyword in keywords {
                let normalized = normalize_header(keyword);
                if !normalized.is_empty() && !list.contains(&normalized) {
                    list.push(normalized);
                }
            }
        }
        self
    }

    /// Keywords for one segment
    pub fn keywords(&self, segment: Segment) -> &[String] {
        self.lists
            .iter()
            .find(|(s, _)| *s == segment)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Segment for an organization
    ///
    /// An explicit value naming a known segment wins. Otherwise the name is
    /// checked against each list in priority order, falling back to General.
    pub fn detect(&self, explicit: Option<&str>, organization_name: &str) -> Segment {
        if let Some(segment) = explicit.and_then(Segment::from_label) {
            return segment;
        }

        let padded = format!(" {} ", normalize_header(organization_name));
        self.lists
            .iter()
            .find(|(_, keywords)| {
                keywords.iter().any(|keyword| {
                    padded.contains(&format!(" {} ", keyword))
                        || padded.contains(&format!(" {}s ", keyword))
                })
            })
            .map(|(segment, _)| *segment)
            .unwrap_or(Segment::General)
    }
}

impl Default for SegmentKeywords {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Organization type for a row
///
/// An explicit value naming a known type wins. Otherwise any column whose
/// header mentions "distributor" holding an affirmative value marks the
/// organization as a distributor.
pub fn detect_organization_type(explicit: Option<&str>, row: &CsvRow) -> OrganizationType {
    if let Some(organization_type) = explicit.and_then(OrganizationType::from_label) {
        return organization_type;
    }

    let flagged = row.values.iter().any(|(header, value)| {
        header.to_lowercase().contains(DISTRIBUTOR_HEADER_MARKER)
            && AFFIRMATIVE_VALUES.contains(&value.trim().to_lowercase().as_str())
    });

    if flagged {
        OrganizationType::Distributor
    } else {
        OrganizationType::default()
    }
}

/// Priority code from a raw value, `C` when missing or unknown
pub fn normalize_priority(raw: Option<&str>) -> Priority {
    raw.and_then(|value| Priority::from_code(&value.trim().to_uppercase()))
        .unwrap_or_default()
}
