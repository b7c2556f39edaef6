//! Slug and display-name conventions for content files.
//!
//! A tutorial's slug is its path below the tutorials directory, without the
//! extension, so files can be grouped into folders freely:
//!
//! - `docker-basics.md` → `docker-basics`
//! - `rust-basics/01-ownership.mdx` → `rust-basics/01-ownership`
//! - `rust-basics/index.md` → `rust-basics`
//! - `Getting Started.md` → `getting-started`
//!
//! Frontmatter may override the derived slug with an explicit `slug:` key.
//! Slugs become output paths, so explicit values must pass [`is_safe_slug`]:
//! `/`-separated segments that are not empty, `.` or `..`, with no `\` or `:`.
//!
//! ## Display Titles
//!
//! Dashes and underscores in the last slug segment become spaces. Used for
//! labels that have no frontmatter title, such as tag chips:
//! - `rust-basics` → "rust basics"
//! - `guides/async_io` → "async io"

use std::path::{Component, Path};

/// Derive a URL slug from a content-relative file path.
///
/// Returns an empty string for paths with no usable components; the loader
/// reports that as a missing slug.
pub fn slug_from_path(rel: &Path) -> String {
    let without_ext = rel.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(slugify_segment(&s.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether `slug` stays below the directory it is joined onto.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains(['\\', ':'])
                && !segment.chars().any(char::is_control)
        })
}

/// Human-readable label for the last segment of a slug.
pub fn display_title(slug: &str) -> String {
    slug.rsplit('/')
        .next()
        .unwrap_or(slug)
        .replace(['-', '_'], " ")
}
