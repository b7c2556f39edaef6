//! YAML frontmatter extraction and tutorial schema validation.
//!
//! Every tutorial file starts with a YAML block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Ownership
//! description: Moves, borrows and lifetimes
//! category: rust
//! tags: [rust, memory]
//! difficulty: beginner
//! status: complete
//! series: rust-basics
//! seriesOrder: 1
//! dateCreated: 2025-01-15
//! dateUpdated: 2025-02-01
//! estimatedTime: 20 min
//! ---
//!
//! # Ownership
//! ```
//!
//! ## Schema
//!
//! | Key | Required | Default |
//! |-----|----------|---------|
//! | `title`, `description`, `category` | yes | |
//! | `difficulty` (`beginner`/`intermediate`/`advanced`) | yes | |
//! | `dateCreated` (`YYYY-MM-DD`) | yes | |
//! | `status` (`draft`/`in-progress`/`complete`) | no | `complete` |
//! | `tags` | no | `[]` |
//! | `series`, `seriesOrder`, `dateUpdated`, `estimatedTime` | no | absent |
//! | `slug` | no | derived from the file path |
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::is_safe_slug;
use crate::types::{Difficulty, Status, Tutorial};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("no frontmatter block (expected a leading `---` line)")]
    Missing,
    #[error("unterminated frontmatter block (expected a closing `---` line)")]
    Unterminated,
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` value '{value}' is not a valid slug")]
    InvalidSlug { field: &'static str, value: String },
}

/// Split `content` into its raw YAML block and the body that follows.
///
/// Returns `Ok(None)` when the file does not start with `---`.
pub fn split_frontmatter(content: &str) -> Result<Option<(&str, &str)>, FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

/// Parse the frontmatter block of `content` into `T`, returning the body too.
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<(T, &str), FrontmatterError> {
    let (yaml, body) = split_frontmatter(content)?.ok_or(FrontmatterError::Missing)?;
    let value: T = serde_yaml::from_str(yaml)?;
    Ok((value, body))
}

/// Tutorial frontmatter exactly as written; every field optional so missing
/// keys can be reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawTutorial {
    slug: Option<String>,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    difficulty: Option<Difficulty>,
    status: Option<Status>,
    series: Option<String>,
    series_order: Option<u32>,
    date_created: Option<NaiveDate>,
    date_updated: Option<NaiveDate>,
    estimated_time: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, FrontmatterError> {
    value.ok_or(FrontmatterError::MissingField(field))
}

/// Accept `value` only if it can be used as an output path segment.
pub(crate) fn checked_slug(
    value: String,
    field: &'static str,
) -> Result<String, FrontmatterError> {
    if is_safe_slug(&value) {
        Ok(value)
    } else {
        Err(FrontmatterError::InvalidSlug { field, value })
    }
}

fn required_str(value: Option<String>, field: &'static str) -> Result<String, FrontmatterError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(FrontmatterError::MissingField(field)),
    }
}

/// Parse a tutorial file.
///
/// `slug` is the path-derived slug; an explicit `slug:` key wins over it.
pub fn parse_tutorial(
    slug: &str,
    source_path: &str,
    content: &str,
) -> Result<Tutorial, FrontmatterError> {
    let (raw, body): (RawTutorial, &str) = parse(content)?;

    let slug = match raw.slug {
        Some(explicit) => explicit,
        None => slug.to_string(),
    };
    let slug = checked_slug(required_str(Some(slug), "slug")?, "slug")?;
    let series = raw
        .series
        .filter(|s| !s.trim().is_empty())
        .map(|s| checked_slug(s, "series"))
        .transpose()?;

    Ok(Tutorial {
        slug,
        title: required_str(raw.title, "title")?,
        description: required_str(raw.description, "description")?,
        category: required_str(raw.category, "category")?,
        tags: raw.tags,
        difficulty: required(raw.difficulty, "difficulty")?,
        status: raw.status.unwrap_or_default(),
        series,
        series_order: raw.series_order,
        date_created: required(raw.date_created, "dateCreated")?,
        date_updated: raw.date_updated,
        estimated_time: raw.estimated_time,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
        source_path: source_path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "---
title: Ownership
description: Moves and borrows
category: rust
tags: [rust, memory]
difficulty: intermediate
status: in-progress
series: rust-basics
seriesOrder: 1
dateCreated: 2025-01-15
dateUpdated: 2025-02-01
estimatedTime: 20 min
---

# Ownership

Body text.
";

    fn minimal(extra: &str) -> String {
        format!(
            "---\ntitle: T\ndescription: D\ncategory: c\ndifficulty: beginner\ndateCreated: 2025-01-15\n{extra}---\nBody\n"
        )
    }

    #[test]
    fn split_returns_yaml_and_body() {
        let (yaml, body) = split_frontmatter("---\na: 1\n---\nhello\n").unwrap().unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "hello\n");
    }

    #[test]
    fn split_handles_crlf() {
        let (yaml, body) = split_frontmatter("---\r\na: 1\r\n---\r\nhello").unwrap().unwrap();
        assert_eq!(yaml, "a: 1\r\n");
        assert_eq!(body, "hello");
    }

    #[test]
    fn split_without_block_is_none() {
        assert!(split_frontmatter("# Just markdown\n").unwrap().is_none());
    }

    #[test]
    fn split_unterminated_is_error() {
        assert!(matches!(
            split_frontmatter("---\na: 1\nno end"),
            Err(FrontmatterError::Unterminated)
        ));
    }

    #[test]
    fn parse_full_tutorial() {
        let t = parse_tutorial("rust-basics/ownership", "tutorials/x.md", FULL).unwrap();
        assert_eq!(t.slug, "rust-basics/ownership");
        assert_eq!(t.title, "Ownership");
        assert_eq!(t.tags, ["rust", "memory"]);
        assert_eq!(t.difficulty, Difficulty::Intermediate);
        assert_eq!(t.status, Status::InProgress);
        assert_eq!(t.series_slug(), Some("rust-basics"));
        assert_eq!(t.series_order, Some(1));
        assert_eq!(t.date_created, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(t.date_updated, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(t.estimated_time.as_deref(), Some("20 min"));
        assert!(t.body.starts_with("# Ownership"));
        assert_eq!(t.source_path, "tutorials/x.md");
    }

    #[test]
    fn optional_fields_default() {
        let t = parse_tutorial("s", "s.md", &minimal("")).unwrap();
        assert_eq!(t.status, Status::Complete);
        assert!(t.tags.is_empty());
        assert_eq!(t.series, None);
        assert_eq!(t.series_order, None);
        assert_eq!(t.date_updated, None);
        assert_eq!(t.estimated_time, None);
    }

    #[test]
    fn explicit_slug_overrides_path() {
        let t = parse_tutorial("from-path", "x.md", &minimal("slug: custom\n")).unwrap();
        assert_eq!(t.slug, "custom");
    }

    #[test]
    fn blank_series_is_dropped() {
        let t = parse_tutorial("s", "s.md", &minimal("series: ''\n")).unwrap();
        assert_eq!(t.series, None);
    }

    #[test]
    fn missing_difficulty_is_named() {
        let content = "---\ntitle: T\ndescription: D\ncategory: c\ndateCreated: 2025-01-15\n---\n";
        let err = parse_tutorial("s", "s.md", content).unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("difficulty")));
    }

    #[test]
    fn missing_date_created_is_named() {
        let content = "---\ntitle: T\ndescription: D\ncategory: c\ndifficulty: beginner\n---\n";
        let err = parse_tutorial("s", "s.md", content).unwrap_err();
        assert_eq!(err.to_string(), "missing required field `dateCreated`");
    }

    #[test]
    fn empty_category_is_missing() {
        let content = minimal("").replace("category: c", "category: ''");
        let err = parse_tutorial("s", "s.md", &content).unwrap_err();
        assert!(matches!(err, FrontmatterError::MissingField("category")));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = parse_tutorial("s", "s.md", &minimal("auther: me\n")).unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn unknown_difficulty_rejected() {
        let content = minimal("").replace("beginner", "expert");
        assert!(matches!(
            parse_tutorial("s", "s.md", &content),
            Err(FrontmatterError::Yaml(_))
        ));
    }

    #[test]
    fn no_frontmatter_is_missing() {
        assert!(matches!(
            parse_tutorial("s", "s.md", "# Title only\n"),
            Err(FrontmatterError::Missing)
        ));
    }

    #[test]
    fn explicit_slug_cannot_leave_output_dir() {
        for slug in ["../../escaped", "/abs", "a//b", "a\\b"] {
            let extra = format!("slug: '{slug}'\n");
            let err = parse_tutorial("s", "s.md", &minimal(&extra)).unwrap_err();
            assert!(
                matches!(err, FrontmatterError::InvalidSlug { field: "slug", .. }),
                "{slug}: {err}"
            );
        }
    }

    #[test]
    fn series_cannot_leave_output_dir() {
        let content = minimal("series: ../../series-escape\n");
        let err = parse_tutorial("s", "s.md", &content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`series` value '../../series-escape' is not a valid slug"
        );
    }

    #[test]
    fn nested_explicit_slug_is_allowed() {
        let t = parse_tutorial("s", "s.md", &minimal("slug: guides/intro\n")).unwrap();
        assert_eq!(t.slug, "guides/intro");
    }
}
