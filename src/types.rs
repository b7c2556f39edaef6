//! Shared content types.
//!
//! A [`Tutorial`] is produced by the loader ([`crate::content`]) and consumed
//! read-only by everything downstream: the organizer, the series navigator,
//! learning-path resolution, and HTML generation.
//!
//! ## Optional field fallbacks
//!
//! Every optional field that has a fallback is read through exactly one
//! accessor, so the organizer and the navigator can never disagree:
//!
//! | Field | Accessor | Fallback |
//! |-------|----------|----------|
//! | `series` | [`Tutorial::series_slug`] | empty string counts as absent |
//! | `series_order` | [`Tutorial::series_order`] | `0` |
//! | `date_updated` | [`Tutorial::effective_date`] | `date_created` |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A required field was absent (or empty) on an input record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tutorial '{slug}' is missing required field `{field}`")]
    MissingField { slug: String, field: &'static str },
}

/// How hard a tutorial is. Declaration order is the aggregation order:
/// `Beginner < Intermediate < Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status. Only the loader looks at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Draft,
    InProgress,
    #[default]
    Complete,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::InProgress => "in-progress",
            Status::Complete => "complete",
        }
    }
}

/// A single tutorial, as loaded from a Markdown file and its frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_order: Option<u32>,
    pub date_created: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Markdown body after the frontmatter block.
    #[serde(skip)]
    pub body: String,
    /// Content-relative path of the source file.
    #[serde(skip)]
    pub source_path: String,
}

impl Tutorial {
    /// The series this tutorial belongs to, if any.
    pub fn series_slug(&self) -> Option<&str> {
        self.series.as_deref().filter(|s| !s.is_empty())
    }

    /// Position within the series; `0` conventionally marks the overview entry.
    pub fn series_order(&self) -> u32 {
        self.series_order.unwrap_or(0)
    }

    /// Date used for recency ordering.
    pub fn effective_date(&self) -> NaiveDate {
        self.date_updated.unwrap_or(self.date_created)
    }

    /// Reject records whose required string fields are empty.
    ///
    /// `difficulty` and `date_created` cannot be absent on a constructed
    /// `Tutorial`; the loader reports those before a record exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = |field| ValidationError::MissingField {
            slug: self.slug.clone(),
            field,
        };
        if self.slug.trim().is_empty() {
            return Err(missing("slug"));
        }
        if self.category.trim().is_empty() {
            return Err(missing("category"));
        }
        Ok(())
    }
}
