//! Data models for CRM imports
//!
//! This module contains the value objects that flow through the import
//! pipeline: raw CSV rows, field mappings, parsed candidate records,
//! validation outcomes and the aggregate import result. All of them are
//! owned by a single import session.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Raw Input
// =============================================================================

/// One data line of the CSV input keyed by column header
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// 1-based data row number (the header line is not counted)
    pub row_number: usize,

    /// Raw column header to raw cell value
    pub values: HashMap<String, String>,
}

impl CsvRow {
    /// Create a row from its number and values
    pub fn new(row_number: usize, values: HashMap<String, String>) -> Self {
        Self { row_number, values }
    }

    /// Build a row from (column, value) pairs
    pub fn from_pairs<K, V>(row_number: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row_number,
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value for a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Trimmed value for a column, `None` when missing or blank
    pub fn get_trimmed(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Field Mapping
// =============================================================================

/// Entity fields a CSV column can be mapped to
///
/// Declaration order is significant: it breaks ties between fields that
/// score equally for the same header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    OrganizationName,
    OrganizationType,
    Priority,
    Segment,
    Address,
    City,
    State,
    PostalCode,
    Phone,
    Website,
    Notes,
    ContactName,
    ContactFirstName,
    ContactLastName,
    ContactEmail,
    ContactPhone,
    ContactTitle,
}

impl TargetField {
    /// All fields in declaration order
    pub const ALL: [TargetField; 17] = [
        TargetField::OrganizationName,
        TargetField::OrganizationType,
        TargetField::Priority,
        TargetField::Segment,
        TargetField::Address,
        TargetField::City,
        TargetField::State,
        TargetField::PostalCode,
        TargetField::Phone,
        TargetField::Website,
        TargetField::Notes,
        TargetField::ContactName,
        TargetField::ContactFirstName,
        TargetField::ContactLastName,
        TargetField::ContactEmail,
        TargetField::ContactPhone,
        TargetField::ContactTitle,
    ];

    /// Snake_case field key
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::OrganizationName => "organization_name",
            TargetField::OrganizationType => "organization_type",
            TargetField::Priority => "priority",
            TargetField::Segment => "segment",
            TargetField::Address => "address",
            TargetField::City => "city",
            TargetField::State => "state",
            TargetField::PostalCode => "postal_code",
            TargetField::Phone => "phone",
            TargetField::Website => "website",
            TargetField::Notes => "notes",
            TargetField::ContactName => "contact_name",
            TargetField::ContactFirstName => "contact_first_name",
            TargetField::ContactLastName => "contact_last_name",
            TargetField::ContactEmail => "contact_email",
            TargetField::ContactPhone => "contact_phone",
            TargetField::ContactTitle => "contact_title",
        }
    }

    /// Position in declaration order
    pub fn declaration_index(&self) -> usize {
        *self as usize
    }

    /// Whether the field belongs to the contact record
    pub fn is_contact_field(&self) -> bool {
        matches!(
            self,
            TargetField::ContactName
                | TargetField::ContactFirstName
                | TargetField::ContactLastName
                | TargetField::ContactEmail
                | TargetField::ContactPhone
                | TargetField::ContactTitle
        )
    }

    /// Whether the field holds an email address
    pub fn is_email(&self) -> bool {
        matches!(self, TargetField::ContactEmail)
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        TargetField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| Error::invalid_mapping(format!("Unknown target field '{}'", s.trim())))
    }
}

/// Where a CSV column goes: a target field or nowhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    Field(TargetField),
    Skip,
}

impl MappingTarget {
    /// The mapped field, if any
    pub fn field(&self) -> Option<TargetField> {
        match self {
            MappingTarget::Field(field) => Some(*field),
            MappingTarget::Skip => None,
        }
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingTarget::Field(field) => field.fmt(f),
            MappingTarget::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for MappingTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "ignore" | "none" => Ok(MappingTarget::Skip),
            other => other.parse().map(MappingTarget::Field),
        }
    }
}

impl Serialize for MappingTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Association of one CSV column to one target field (or skip)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMapping {
    /// Raw CSV column header
    pub csv_column: String,

    /// Chosen target
    pub target: MappingTarget,

    /// Heuristic certainty 0-100
    pub confidence: u8,

    /// Set when a user replaced the automatic guess
    pub user_overridden: bool,
}

impl FieldMapping {
    /// Automatic mapping produced by header analysis
    pub fn automatic(csv_column: impl Into<String>, field: TargetField, confidence: u8) -> Self {
        Self {
            csv_column: csv_column.into(),
            target: MappingTarget::Field(field),
            confidence: confidence.min(100),
            user_overridden: false,
        }
    }

    /// Column left unmapped
    pub fn skip(csv_column: impl Into<String>) -> Self {
        Self {
            csv_column: csv_column.into(),
            target: MappingTarget::Skip,
            confidence: 0,
            user_overridden: false,
        }
    }

    /// The mapped field, if any
    pub fn field(&self) -> Option<TargetField> {
        self.target.field()
    }

    /// Whether the column is skipped
    pub fn is_skip(&self) -> bool {
        self.target == MappingTarget::Skip
    }
}

/// Find the column mapped to a field (first one wins when duplicated)
pub fn column_for(mappings: &[FieldMapping], field: TargetField) -> Option<&str> {
    mappings
        .iter()
        .find(|m| m.field() == Some(field))
        .map(|m| m.csv_column.as_str())
}

// =============================================================================
// Candidate Records
// =============================================================================

/// Organization classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    #[default]
    Customer,
    Principal,
    Distributor,
    Prospect,
    Vendor,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Customer => "customer",
            OrganizationType::Principal => "principal",
            OrganizationType::Distributor => "distributor",
            OrganizationType::Prospect => "prospect",
            OrganizationType::Vendor => "vendor",
        }
    }

    /// Parse a free-text label, case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "customer" => Some(OrganizationType::Customer),
            "principal" => Some(OrganizationType::Principal),
            "distributor" => Some(OrganizationType::Distributor),
            "prospect" => Some(OrganizationType::Prospect),
            "vendor" => Some(OrganizationType::Vendor),
            _ => None,
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account priority, A highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    A,
    B,
    #[default]
    C,
    D,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::A => "A",
            Priority::B => "B",
            Priority::C => "C",
            Priority::D => "D",
        }
    }

    /// Parse an exact upper-case code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Priority::A),
            "B" => Some(Priority::B),
            "C" => Some(Priority::C),
            "D" => Some(Priority::D),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market segment inferred from the organization name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Segment {
    Restaurant,
    Institutional,
    Retail,
    Hospitality,
    #[default]
    General,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Restaurant => "Restaurant",
            Segment::Institutional => "Institutional",
            Segment::Retail => "Retail",
            Segment::Hospitality => "Hospitality",
            Segment::General => "General",
        }
    }

    /// Parse a free-text label, case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "restaurant" => Some(Segment::Restaurant),
            "institutional" => Some(Segment::Institutional),
            "retail" => Some(Segment::Retail),
            "hospitality" => Some(Segment::Hospitality),
            "general" => Some(Segment::General),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization candidate parsed from a CSV row, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOrganization {
    pub name: String,
    pub organization_type: OrganizationType,
    pub priority: Priority,
    pub segment: Segment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Contact candidate parsed from a CSV row, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedContact {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Name of the organization parsed from the same row
    pub organization_name: String,
}

impl ParsedContact {
    /// "First Last" for reporting
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Everything parsed from one CSV row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRow {
    pub row_number: usize,
    pub organization: ParsedOrganization,
    pub contacts: Vec<ParsedContact>,
}

// =============================================================================
// Validation
// =============================================================================

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field the issue concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<TargetField>,

    /// CSV column the issue concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            column: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: TargetField, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            column: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a row or batch check
///
/// Validity is derived from `errors`, so it can never disagree with it.
/// Warnings never block an import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// True iff there are no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages joined for reporting
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A parsed row plus the checks that decide whether it is written
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub parsed: ParsedRow,
    pub validation: ValidationResult,

    /// Organization already exists (in the store or earlier in the file)
    pub duplicate: bool,
}

// =============================================================================
// Import Result
// =============================================================================

/// Kind of record written by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organization,
    Contact,
}

impl EntityKind {
    /// Noun with the right number for a count
    pub fn noun(&self, count: usize) -> &'static str {
        match (self, count) {
            (EntityKind::Organization, 1) => "organization",
            (EntityKind::Organization, _) => "organizations",
            (EntityKind::Contact, 1) => "contact",
            (EntityKind::Contact, _) => "contacts",
        }
    }
}

/// Why a candidate was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row failed validation
    Invalid,
    /// Organization already exists
    Duplicate,
    /// Parent organization was not created in this run
    ParentNotImported,
}

impl SkipReason {
    /// Label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::Invalid => "invalid",
            SkipReason::Duplicate => "duplicates",
            SkipReason::ParentNotImported => "organization not imported",
        }
    }
}

/// A candidate that was deliberately not written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSkip {
    pub row_number: usize,
    pub entity: EntityKind,
    pub name: String,
    pub reason: SkipReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A candidate whose write was rejected by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub entity: EntityKind,
    pub name: String,
    pub message: String,
}

/// Counts for one entity kind
///
/// `created + skipped + failed.len() == submitted` once an import finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityImportResult {
    pub submitted: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: Vec<RowFailure>,
}

impl EntityImportResult {
    /// Whether every submitted candidate is accounted for
    pub fn is_balanced(&self) -> bool {
        self.created + self.skipped + self.failed.len() == self.submitted
    }
}

/// Executor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportState {
    #[default]
    Idle,
    Importing,
    Completed,
    FailedWithPartialResults,
}

impl ImportState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportState::Idle => "idle",
            ImportState::Importing => "importing",
            ImportState::Completed => "completed",
            ImportState::FailedWithPartialResults => "failed with partial results",
        }
    }
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate outcome across a whole batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    pub organizations: EntityImportResult,
    pub contacts: EntityImportResult,
    pub skipped_rows: Vec<RowSkip>,
    pub state: ImportState,

    /// The duplicate lookup failed and the import proceeded without it
    pub duplicate_check_unavailable: bool,

    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportResult {
    /// Empty result for a batch about to start
    pub fn new() -> Self {
        Self {
            organizations: EntityImportResult::default(),
            contacts: EntityImportResult::default(),
            skipped_rows: Vec::new(),
            state: ImportState::Idle,
            duplicate_check_unavailable: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Counts for one entity kind
    pub fn entity(&self, entity: EntityKind) -> &EntityImportResult {
        match entity {
            EntityKind::Organization => &self.organizations,
            EntityKind::Contact => &self.contacts,
        }
    }

    /// Whether both entity kinds satisfy the count invariant
    pub fn is_balanced(&self) -> bool {
        self.organizations.is_balanced() && self.contacts.is_balanced()
    }

    /// Number of skips of one kind for one reason
    pub fn skipped_for(&self, entity: EntityKind, reason: SkipReason) -> usize {
        self.skipped_rows
            .iter()
            .filter(|s| s.entity == entity && s.reason == reason)
            .count()
    }

    /// Whether any write failed
    pub fn has_failures(&self) -> bool {
        !self.organizations.failed.is_empty() || !self.contacts.failed.is_empty()
    }

    /// All write failures, organizations first
    pub fn failures(&self) -> impl Iterator<Item = &RowFailure> {
        self.organizations
            .failed
            .iter()
            .chain(self.contacts.failed.iter())
    }
}

impl Default for ImportResult {
    fn default() -> Self {
        Self::new()
    }
}
