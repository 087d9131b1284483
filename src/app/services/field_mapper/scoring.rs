//! Header normalization and match ranking
//!
//! The ranking function is pure and its scores are pinned by tests:
//!
//! | Match                                              | Score              |
//! |----------------------------------------------------|--------------------|
//! | header equals the field key                        | 100                |
//! | header equals synonym at rank r                    | 90 - min(r, 10)    |
//! | header contains synonym (or the reverse), rank r   | 70 - min(r, 10)    |
//! | shared-token ratio >= 0.5                          | floor(40 * ratio)  |
//!
//! The field key itself counts as rank 0 for partial and overlap matches.

use crate::app::models::TargetField;
use crate::constants::scores;
use std::collections::HashSet;

/// Tier a match was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    ExactField,
    Synonym,
    Partial,
    TokenOverlap,
}

/// Score of one header against one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    /// Confidence 0-100
    pub score: u8,
    pub kind: MatchKind,
    /// Rank of the synonym that produced the match (0 for the field key)
    pub rank: usize,
}

/// Lowercase, turn punctuation into spaces, collapse whitespace
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized key for a field, e.g. `organization name`
pub fn field_key(field: TargetField) -> String {
    normalize_header(field.as_str())
}

fn rank_penalty(rank: usize) -> u8 {
    rank.min(scores::MAX_RANK_PENALTY as usize) as u8
}

/// Whether `needle` appears in `haystack` on token boundaries
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

/// Shared distinct tokens over the larger token count
fn token_overlap(a: &str, b: &str) -> f64 {
    let a: HashSet<&str> = a.split(' ').collect();
    let b: HashSet<&str> = b.split(' ').collect();
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / larger as f64
}

/// Score a normalized header against one field and its synonyms
///
/// Returns `None` when nothing matches.
pub fn score_field(header: &str, field: TargetField, synonyms: &[String]) -> Option<MatchScore> {
    if header.is_empty() {
        return None;
    }

    let key = field_key(field);
    if header == key {
        return Some(MatchScore {
            score: scores::EXACT_FIELD,
            kind: MatchKind::ExactField,
            rank: 0,
        });
    }

    if let Some(rank) = synonyms.iter().position(|s| s == header) {
        return Some(MatchScore {
            score: scores::SYNONYM - rank_penalty(rank),
            kind: MatchKind::Synonym,
            rank,
        });
    }

    // Key first at rank 0, then synonyms at their own rank
    let phrases = std::iter::once((0, key.as_str())).chain(
        synonyms
            .iter()
            .enumerate()
            .map(|(rank, s)| (rank, s.as_str())),
    );

    let mut best_overlap: Option<(f64, usize)> = None;
    let mut best_partial: Option<usize> = None;

    for (rank, phrase) in phrases {
        if contains_phrase(header, phrase) || contains_phrase(phrase, header) {
            best_partial = Some(best_partial.map_or(rank, |r| r.min(rank)));
        }

        let ratio = token_overlap(header, phrase);
        let better = match best_overlap {
            None => true,
            Some((best_ratio, best_rank)) => {
                ratio > best_ratio || (ratio == best_ratio && rank < best_rank)
            }
        };
        if better {
            best_overlap = Some((ratio, rank));
        }
    }

    if let Some(rank) = best_partial {
        return Some(MatchScore {
            score: scores::PARTIAL - rank_penalty(rank),
            kind: MatchKind::Partial,
            rank,
        });
    }

    match best_overlap {
        Some((ratio, rank)) if ratio >= scores::MIN_TOKEN_OVERLAP => Some(MatchScore {
            score: (f64::from(scores::TOKEN_OVERLAP_MAX) * ratio).floor() as u8,
            kind: MatchKind::TokenOverlap,
            rank,
        }),
        _ => None,
    }
}
