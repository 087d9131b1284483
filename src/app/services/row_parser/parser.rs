//! Row-level parsing over the column mappings

use super::classification::{SegmentKeywords, detect_organization_type, normalize_priority};
use super::name_split::{SplitName, split_full_name};
use crate::app::models::{
    CsvRow, FieldMapping, ParsedContact, ParsedOrganization, ParsedRow, TargetField,
};
use std::collections::HashMap;
use tracing::debug;

/// Parser for rows sharing one set of mappings
///
/// When a field is mapped by more than one column the first column wins;
/// batch validation reports such mappings before rows are parsed.
#[derive(Debug, Clone)]
pub struct RowParser {
    columns: HashMap<TargetField, String>,
    keywords: SegmentKeywords,
}

impl RowParser {
    pub fn new(mappings: &[FieldMapping], keywords: SegmentKeywords) -> Self {
        let mut columns = HashMap::new();
        for mapping in mappings {
            if let Some(field) = mapping.field() {
                columns
                    .entry(field)
                    .or_insert_with(|| mapping.csv_column.clone());
            }
        }

        Self { columns, keywords }
    }

    /// Column mapped to a field, if any
    pub fn column(&self, field: TargetField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    /// Whether any contact field is mapped
    pub fn has_contact_columns(&self) -> bool {
        self.columns.keys().any(TargetField::is_contact_field)
    }

    fn value<'a>(&self, row: &'a CsvRow, field: TargetField) -> Option<&'a str> {
        self.column(field).and_then(|column| row.get_trimmed(column))
    }

    fn owned(&self, row: &CsvRow, field: TargetField) -> Option<String> {
        self.value(row, field).map(str::to_string)
    }

    /// Parse one row into an organization and its contacts
    pub fn parse(&self, row: &CsvRow) -> ParsedRow {
        let organization = self.parse_organization(row);
        let contacts = self
            .parse_contact(row, &organization.name)
            .into_iter()
            .collect::<Vec<_>>();

        debug!(
            "Parsed row {}: organization '{}' ({}, {}, priority {}), {} contact(s)",
            row.row_number,
            organization.name,
            organization.organization_type,
            organization.segment,
            organization.priority,
            contacts.len()
        );

        ParsedRow {
            row_number: row.row_number,
            organization,
            contacts,
        }
    }

    /// Parse every row in order
    pub fn parse_all(&self, rows: &[CsvRow]) -> Vec<ParsedRow> {
        rows.iter().map(|row| self.parse(row)).collect()
    }

    fn parse_organization(&self, row: &CsvRow) -> ParsedOrganization {
        let name = self
            .value(row, TargetField::OrganizationName)
            .unwrap_or_default()
            .to_string();

        ParsedOrganization {
            organization_type: detect_organization_type(
                self.value(row, TargetField::OrganizationType),
                row,
            ),
            priority: normalize_priority(self.value(row, TargetField::Priority)),
            segment: self
                .keywords
                .detect(self.value(row, TargetField::Segment), &name),
            address: self.owned(row, TargetField::Address),
            city: self.owned(row, TargetField::City),
            state: self.owned(row, TargetField::State),
            postal_code: self.owned(row, TargetField::PostalCode),
            phone: self.owned(row, TargetField::Phone),
            website: self.owned(row, TargetField::Website),
            notes: self.owned(row, TargetField::Notes),
            name,
        }
    }

    /// A contact exists only when some mapped contact column has a value
    fn parse_contact(&self, row: &CsvRow, organization_name: &str) -> Option<ParsedContact> {
        let has_value = self
            .columns
            .iter()
            .filter(|(field, _)| field.is_contact_field())
            .any(|(_, column)| row.get_trimmed(column).is_some());
        if !has_value {
            return None;
        }

        let split = self
            .value(row, TargetField::ContactName)
            .map(split_full_name)
            .unwrap_or_default();
        let SplitName { first, last } = split;

        Some(ParsedContact {
            first_name: self.owned(row, TargetField::ContactFirstName).unwrap_or(first),
            last_name: self.owned(row, TargetField::ContactLastName).unwrap_or(last),
            email: self.owned(row, TargetField::ContactEmail),
            phone: self.owned(row, TargetField::ContactPhone),
            title: self.owned(row, TargetField::ContactTitle),
            organization_name: organization_name.to_string(),
        })
    }
}
