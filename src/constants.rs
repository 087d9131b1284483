//! Application constants for the CRM importer
//!
//! This module contains the built-in synonym table, classification keyword
//! lists, scoring constants and store table names used throughout the
//! import pipeline. Runtime configuration layers on top of these values;
//! nothing here is mutated.

// =============================================================================
// Field Mapping
// =============================================================================

/// Built-in header synonyms per target field, highest priority first
///
/// Keys are the snake_case target field names. Rank inside each list is the
/// tie-break between otherwise equal matches, so reordering entries changes
/// mapping results.
pub const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "organization_name",
        &[
            "company name",
            "company",
            "organization",
            "org name",
            "business name",
            "account name",
            "business",
            "account",
            "customer name",
            "customer",
        ],
    ),
    (
        "organization_type",
        &[
            "type",
            "org type",
            "organization type",
            "company type",
            "account type",
            "category",
        ],
    ),
    (
        "priority",
        &["priority", "rank", "tier", "priority level", "account priority"],
    ),
    (
        "segment",
        &["segment", "market segment", "industry", "vertical", "channel"],
    ),
    (
        "address",
        &[
            "address",
            "street",
            "street address",
            "address 1",
            "address line 1",
            "addr",
        ],
    ),
    ("city", &["city", "town", "locality"]),
    ("state", &["state", "province", "region", "st"]),
    (
        "postal_code",
        &["zip", "zip code", "postal code", "postcode", "zipcode"],
    ),
    (
        "phone",
        &[
            "phone",
            "company phone",
            "main phone",
            "office phone",
            "telephone",
            "tel",
        ],
    ),
    (
        "website",
        &["website", "web site", "url", "web", "homepage", "domain"],
    ),
    (
        "notes",
        &["notes", "note", "comments", "comment", "description", "remarks"],
    ),
    (
        "contact_name",
        &[
            "name",
            "full name",
            "contact",
            "contact person",
            "primary contact",
            "person",
        ],
    ),
    (
        "contact_first_name",
        &["first name", "first", "given name", "fname", "forename"],
    ),
    (
        "contact_last_name",
        &["last name", "last", "surname", "family name", "lname"],
    ),
    (
        "contact_email",
        &["email", "e mail", "email address", "contact email", "mail"],
    ),
    (
        "contact_phone",
        &[
            "mobile",
            "cell",
            "contact phone",
            "mobile phone",
            "cell phone",
            "direct phone",
        ],
    ),
    ("contact_title", &["title", "job title", "position", "role"]),
];

/// Mapping confidence scores produced by the ranking function
pub mod scores {
    /// Normalized header equals the field key itself
    pub const EXACT_FIELD: u8 = 100;

    /// Normalized header equals a synonym (minus rank penalty)
    pub const SYNONYM: u8 = 90;

    /// Header contains a synonym on token boundaries, or the reverse
    pub const PARTIAL: u8 = 70;

    /// Ceiling for token-overlap matches (scaled by overlap ratio)
    pub const TOKEN_OVERLAP_MAX: u8 = 40;

    /// Minimum shared-token ratio for an overlap match
    pub const MIN_TOKEN_OVERLAP: f64 = 0.5;

    /// Largest rank penalty subtracted for late synonyms
    pub const MAX_RANK_PENALTY: u8 = 10;

    /// Lowest score that still counts as a synonym-level match
    pub const SYNONYM_MATCH_THRESHOLD: u8 = SYNONYM - MAX_RANK_PENALTY;

    /// Mappings under this confidence warn unless a user overrode them
    pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: u8 = 50;

    /// Confidence assigned to user overrides
    pub const USER_OVERRIDE: u8 = 100;
}

// =============================================================================
// Classification
// =============================================================================

/// Segment keyword lists in detection priority order
pub mod segment_keywords {
    pub const RESTAURANT: &[&str] = &[
        "restaurant",
        "pizza",
        "pizzeria",
        "grill",
        "cafe",
        "bistro",
        "diner",
        "bar",
        "kitchen",
        "eatery",
        "steakhouse",
        "bakery",
        "tavern",
        "pub",
        "taqueria",
        "sushi",
        "bbq",
        "burger",
        "deli",
    ];

    pub const INSTITUTIONAL: &[&str] = &[
        "school",
        "university",
        "college",
        "hospital",
        "medical",
        "clinic",
        "health",
        "healthcare",
        "church",
        "prison",
        "correctional",
        "academy",
        "district",
        "campus",
        "cafeteria",
        "nursing",
    ];

    pub const RETAIL: &[&str] = &[
        "market",
        "grocery",
        "store",
        "shop",
        "mart",
        "supermarket",
        "foods",
        "pharmacy",
        "outlet",
        "retail",
    ];

    pub const HOSPITALITY: &[&str] = &[
        "hotel",
        "inn",
        "resort",
        "lodge",
        "motel",
        "suites",
        "casino",
        "hospitality",
        "spa",
    ];
}

/// Header fragment that marks a distributor flag column
pub const DISTRIBUTOR_HEADER_MARKER: &str = "distributor";

/// Cell values read as "yes" in a distributor flag column
pub const AFFIRMATIVE_VALUES: &[&str] = &["yes", "y", "true", "1", "x", "distributor"];

/// Allowed priority codes
pub const PRIORITY_CODES: &[&str] = &["A", "B", "C", "D"];

// =============================================================================
// Validation
// =============================================================================

/// Simple local@domain.tld check applied to email fields
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// =============================================================================
// Store
// =============================================================================

/// Table holding organization records
pub const ORGANIZATIONS_TABLE: &str = "organizations";

/// Table holding contact records
pub const CONTACTS_TABLE: &str = "contacts";

/// Column used for organization duplicate lookups
pub const ORGANIZATION_NAME_COLUMN: &str = "name";

/// Default JSON store file name
pub const DEFAULT_STORE_FILE: &str = "crm-store.json";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Application directory name under the user config dir
pub const APP_CONFIG_DIR: &str = "crm-import";

/// Config file name inside the application config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Row issues shown by the preview command before truncating
pub const PREVIEW_ISSUE_LIMIT: usize = 20;
