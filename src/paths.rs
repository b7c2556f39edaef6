//! Learning paths: curated, ordered lists of tutorial slugs.
//!
//! A path file lives in the paths directory and references tutorials by slug:
//!
//! ```markdown
//! ---
//! title: Backend Fundamentals
//! description: From containers to async Rust
//! difficulty: intermediate
//! tutorials:
//!   - docker-basics
//!   - rust-basics/ownership
//! ---
//!
//! Optional introduction rendered above the step list.
//! ```
//!
//! Resolution keeps the declared order. Slugs that match no loaded tutorial
//! (deleted, renamed, or filtered out as drafts) are collected in
//! [`ResolvedPath::missing`] rather than failing the build, so `check` can
//! report them all at once.

use crate::frontmatter::{self, FrontmatterError};
use crate::types::{Difficulty, Tutorial};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum PathError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    #[error("learning path lists no tutorials")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Tutorial slugs in reading order.
    pub tutorials: Vec<String>,
    #[serde(skip)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawPath {
    slug: Option<String>,
    title: String,
    description: String,
    difficulty: Option<Difficulty>,
    estimated_time: Option<String>,
    #[serde(default)]
    tutorials: Vec<String>,
}

/// Parse a learning-path file; `slug` is the path-derived slug.
pub fn parse_path(slug: &str, content: &str) -> Result<LearningPath, PathError> {
    let (raw, body): (RawPath, &str) = frontmatter::parse(content)?;
    if raw.tutorials.is_empty() {
        return Err(PathError::Empty);
    }
    let slug = raw.slug.unwrap_or_else(|| slug.to_string());
    let slug = frontmatter::checked_slug(slug, "slug")?;
    Ok(LearningPath {
        slug,
        title: raw.title,
        description: raw.description,
        difficulty: raw.difficulty,
        estimated_time: raw.estimated_time,
        tutorials: raw.tutorials,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

/// A learning path with its slugs looked up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPath<'a> {
    pub path: &'a LearningPath,
    /// Found tutorials, in the path's declared order.
    pub steps: Vec<&'a Tutorial>,
    /// Declared slugs with no matching tutorial.
    pub missing: Vec<&'a str>,
}

impl ResolvedPath<'_> {
    /// Declared difficulty, or the hardest step when none is declared.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.path
            .difficulty
            .or_else(|| self.steps.iter().map(|t| t.difficulty).max())
    }
}

pub fn resolve_path<'a>(path: &'a LearningPath, tutorials: &'a [Tutorial]) -> ResolvedPath<'a> {
    let by_slug: HashMap<&str, &Tutorial> =
        tutorials.iter().map(|t| (t.slug.as_str(), t)).collect();

    let mut steps = Vec::with_capacity(path.tutorials.len());
    let mut missing = Vec::new();
    for slug in &path.tutorials {
        match by_slug.get(slug.as_str()) {
            Some(t) => steps.push(*t),
            None => {
                warn!(path = %path.slug, tutorial = %slug, "learning path references unknown tutorial");
                missing.push(slug.as_str());
            }
        }
    }

    ResolvedPath {
        path,
        steps,
        missing,
    }
}
