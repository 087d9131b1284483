//! Contact name splitting

/// First and last name parts of a full name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitName {
    pub first: String,
    pub last: String,
}

impl SplitName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }
}

/// Split a full name into first and last parts
///
/// With a comma the text is read as "Last, First" and split at the first
/// comma. Otherwise the first token is the first name and the remaining
/// tokens form the last name; a single token leaves the last name empty.
pub fn split_full_name(full_name: &str) -> SplitName {
    let full_name = full_name.trim();

    if let Some((last, first)) = full_name.split_once(',') {
        return SplitName::new(collapse(first), collapse(last));
    }

    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    let last = tokens.collect::<Vec<_>>().join(" ");
    SplitName::new(first, last)
}

fn collapse(part: &str) -> String {
    part.split_whitespace().collect::<Vec<_>>().join(" ")
}
