//! Shared test utilities for the tutorial-hub test suite.
//!
//! Provides a record builder for in-memory tests and fixture setup for tests
//! that go through the filesystem loader.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let ts = vec![
//!     tutorial("intro").in_series("rust-basics", Some(0)),
//!     tutorial("docker-basics").created(2025, 1, 15).tags(&["docker"]),
//! ];
//! let organized = organize(&ts).unwrap();
//! ```

use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

use crate::content::Content;
use crate::types::{Difficulty, Status, Tutorial};

// =========================================================================
// Record builder
// =========================================================================

/// A complete, valid standalone tutorial with predictable defaults:
/// title `"<slug> title"`, category `"general"`, beginner, created 2025-01-01.
pub fn tutorial(slug: &str) -> Tutorial {
    Tutorial {
        slug: slug.to_string(),
        title: format!("{slug} title"),
        description: format!("{slug} description"),
        category: "general".to_string(),
        tags: Vec::new(),
        difficulty: Difficulty::Beginner,
        status: Status::Complete,
        series: None,
        series_order: None,
        date_created: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        date_updated: None,
        estimated_time: None,
        body: String::new(),
        source_path: format!("tutorials/{slug}.md"),
    }
}

/// Chainable setters for [`tutorial`].
pub trait TutorialBuilder: Sized {
    fn in_series(self, series: &str, order: Option<u32>) -> Self;
    fn created(self, y: i32, m: u32, d: u32) -> Self;
    fn updated(self, y: i32, m: u32, d: u32) -> Self;
    fn difficulty(self, difficulty: Difficulty) -> Self;
    fn category(self, category: &str) -> Self;
    fn tags(self, tags: &[&str]) -> Self;
    fn title(self, title: &str) -> Self;
    fn description(self, description: &str) -> Self;
    fn status(self, status: Status) -> Self;
}

impl TutorialBuilder for Tutorial {
    fn in_series(mut self, series: &str, order: Option<u32>) -> Self {
        self.series = Some(series.to_string());
        self.series_order = order;
        self
    }

    fn created(mut self, y: i32, m: u32, d: u32) -> Self {
        self.date_created = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        self
    }

    fn updated(mut self, y: i32, m: u32, d: u32) -> Self {
        self.date_updated = Some(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        self
    }

    fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Content lookups (panic with a clear message on miss)
// =========================================================================

/// Find a loaded tutorial by slug. Panics if not found.
pub fn find_tutorial<'a>(content: &'a Content, slug: &str) -> &'a Tutorial {
    content
        .tutorials
        .iter()
        .find(|t| t.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = content.tutorials.iter().map(|t| t.slug.as_str()).collect();
            panic!("tutorial '{slug}' not found. Available: {slugs:?}")
        })
}

/// All loaded tutorial slugs in load order.
pub fn tutorial_slugs(content: &Content) -> Vec<&str> {
    content.tutorials.iter().map(|t| t.slug.as_str()).collect()
}
