//! # Tutorial Hub
//!
//! A static site generator for tutorials, tutorial series, and learning paths.
//! Tutorials are Markdown/MDX files with YAML frontmatter; a `series:` key
//! groups them into ordered series, and learning paths curate tutorials
//! across series.
//!
//! # Architecture: Load → Organize → Generate
//!
//! ```text
//! 1. Load       content/    →  Content          (files → validated records)
//! 2. Organize   Content     →  OrganizedResult   (standalone + series, vocabularies)
//!               Tutorial    →  SeriesNavigation  (per page: position, prev/next)
//! 3. Generate   both        →  dist/             (final HTML site)
//! ```
//!
//! Loading is the only stage that touches the filesystem for input. The
//! organizer and the navigator are pure functions over the loaded tutorial
//! slice: they never read files, environment variables, or global state, and
//! they recompute from scratch on every call. That keeps the interesting
//! logic (grouping, ordering, aggregation) testable with plain in-memory
//! records.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Tutorial` record, `Difficulty`/`Status`, optional-field accessors |
//! | [`organize`] | Partition into standalone tutorials and ordered series |
//! | [`navigate`] | Series position and prev/next for one tutorial |
//! | [`paths`] | Learning paths and slug resolution |
//! | [`frontmatter`] | YAML frontmatter splitting and schema validation |
//! | [`naming`] | Slugs from file paths, display titles |
//! | [`content`] | Walk the content root, load tutorials and paths, draft gate |
//! | [`config`] | `config.toml` loading, validation, and color CSS |
//! | [`generate`] | HTML rendering with Maud, search index |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Sort for Series Order
//!
//! The listing page and each tutorial page must agree on what "Part 2" is.
//! Both go through [`organize::sort_series_members`]: ascending
//! `seriesOrder`, missing treated as 0, stable on ties. Duplicate orders are
//! logged, not rejected.
//!
//! ## Drafts Are an Argument
//!
//! Whether drafts are visible is decided per run and passed to the loader as
//! [`content::IncludeDrafts`]. Nothing downstream filters by status.
//!
//! ## Borrowed Results
//!
//! [`organize::OrganizedResult`] and [`navigate::SeriesNavigation`] hold
//! references into the caller's tutorial slice. They live for one page
//! render and are never cached.

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod generate;
pub mod naming;
pub mod navigate;
pub mod organize;
pub mod output;
pub mod paths;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
