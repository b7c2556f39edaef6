//! Content loading: Markdown files on disk to validated records in memory.
//!
//! Stage 1 of the build. Walks the content root and produces a [`Content`]
//! value that every later stage (organize, navigate, generate) reads from.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                    # Site configuration (optional)
//! ├── tutorials/
//! │   ├── docker-basics.md           # Standalone tutorial
//! │   └── rust-basics/               # Folders are only for tidiness;
//! │       ├── index.md               # membership comes from `series:`
//! │       ├── 01-ownership.mdx
//! │       └── 02-traits.md
//! └── paths/
//!     └── backend.md                 # Learning path (list of tutorial slugs)
//! ```
//!
//! ## Validation
//!
//! The loader enforces these rules:
//! - Every tutorial file has frontmatter with all required fields
//! - Slugs are unique across the tutorial set
//! - Learning paths list at least one tutorial
//!
//! Drafts are kept or dropped according to the [`IncludeDrafts`] argument,
//! never according to ambient process state.

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::naming::slug_from_path;
use crate::paths::{self, LearningPath, PathError};
use crate::types::{Status, Tutorial};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Tutorials directory not found: {0}")]
    NoTutorialsDir(PathBuf),
    #[error("{path}: {source}")]
    Tutorial {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("{path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: PathError,
    },
    #[error("Duplicate slug '{slug}' in {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Whether draft tutorials take part in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncludeDrafts {
    Yes,
    #[default]
    No,
}

impl From<bool> for IncludeDrafts {
    fn from(include: bool) -> Self {
        if include {
            IncludeDrafts::Yes
        } else {
            IncludeDrafts::No
        }
    }
}

/// Everything loaded from a content root.
#[derive(Debug)]
pub struct Content {
    /// Visible tutorials, in path order.
    pub tutorials: Vec<Tutorial>,
    pub paths: Vec<LearningPath>,
    pub config: SiteConfig,
    /// Drafts dropped because of [`IncludeDrafts::No`].
    pub skipped_drafts: usize,
}

const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

pub fn load(root: &Path, include_drafts: IncludeDrafts) -> Result<Content, ContentError> {
    let config = config::load_config(root)?;

    let tutorials_root = root.join(&config.tutorials_dir);
    if !tutorials_root.is_dir() {
        return Err(ContentError::NoTutorialsDir(tutorials_root));
    }

    let files = collect_content_files(&tutorials_root)?;
    debug!(count = files.len(), dir = %tutorials_root.display(), "found tutorial files");

    let parsed: Vec<Tutorial> = files
        .par_iter()
        .map(|file| load_tutorial(root, &tutorials_root, file))
        .collect::<Result<_, _>>()?;

    check_unique_slugs(&parsed)?;

    let total = parsed.len();
    let tutorials: Vec<Tutorial> = parsed
        .into_iter()
        .filter(|t| include_drafts == IncludeDrafts::Yes || t.status != Status::Draft)
        .collect();
    let skipped_drafts = total - tutorials.len();
    if skipped_drafts > 0 {
        info!(skipped_drafts, "drafts excluded (pass --drafts to include them)");
    }

    let paths_root = root.join(&config.paths_dir);
    let paths = if paths_root.is_dir() {
        collect_content_files(&paths_root)?
            .iter()
            .map(|file| load_path(&paths_root, file))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    Ok(Content {
        tutorials,
        paths,
        config,
        skipped_drafts,
    })
}

/// All Markdown/MDX files below `dir`, sorted, hidden entries skipped.
fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_content_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    CONTENT_EXTENSIONS.contains(&ext.as_str())
}

fn relative(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

fn load_tutorial(root: &Path, tutorials_root: &Path, file: &Path) -> Result<Tutorial, ContentError> {
    let content = fs::read_to_string(file)?;
    let slug = slug_from_path(&relative(file, tutorials_root));
    let source_path = relative(file, root).to_string_lossy().replace('\\', "/");

    frontmatter::parse_tutorial(&slug, &source_path, &content).map_err(|source| {
        ContentError::Tutorial {
            path: file.to_path_buf(),
            source,
        }
    })
}

fn load_path(paths_root: &Path, file: &Path) -> Result<LearningPath, ContentError> {
    let content = fs::read_to_string(file)?;
    let slug = slug_from_path(&relative(file, paths_root));
    paths::parse_path(&slug, &content).map_err(|source| ContentError::Path {
        path: file.to_path_buf(),
        source,
    })
}

/// Slugs are identity for navigation and URLs; two files claiming one slug
/// would silently shadow each other.
fn check_unique_slugs(tutorials: &[Tutorial]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &Tutorial> = HashMap::new();
    for tutorial in tutorials {
        if let Some(first) = seen.insert(tutorial.slug.as_str(), tutorial) {
            return Err(ContentError::DuplicateSlug {
                slug: tutorial.slug.clone(),
                first: first.source_path.clone(),
                second: tutorial.source_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn tutorial_file(title: &str, extra: &str) -> String {
        format!(
            "---\ntitle: {title}\ndescription: About {title}\ncategory: general\ndifficulty: beginner\ndateCreated: 2025-01-15\n{extra}---\n\n# {title}\n"
        )
    }

    #[test]
    fn fixtures_load_published_tutorials() {
        let tmp = setup_fixtures();
        let content = load(tmp.path(), IncludeDrafts::No).unwrap();

        assert_eq!(
            tutorial_slugs(&content),
            [
                "docker-basics",
                "git-workflows",
                "rust-basics/01-ownership",
                "rust-basics/02-traits",
                "rust-basics",
            ]
        );
        assert_eq!(content.skipped_drafts, 1);
        assert_eq!(content.config.title, "Fixture Tutorials");
    }

    #[test]
    fn fixtures_include_drafts_on_request() {
        let tmp = setup_fixtures();
        let content = load(tmp.path(), IncludeDrafts::Yes).unwrap();
        let draft = find_tutorial(&content, "kubernetes-intro");
        assert_eq!(draft.status, Status::Draft);
        assert_eq!(content.skipped_drafts, 0);
    }

    #[test]
    fn fixtures_load_learning_paths() {
        let tmp = setup_fixtures();
        let content = load(tmp.path(), IncludeDrafts::No).unwrap();
        assert_eq!(content.paths.len(), 1);
        assert_eq!(content.paths[0].slug, "backend-fundamentals");
    }

    #[test]
    fn mdx_files_are_loaded() {
        let tmp = setup_fixtures();
        let content = load(tmp.path(), IncludeDrafts::No).unwrap();
        let t = find_tutorial(&content, "rust-basics/01-ownership");
        assert_eq!(t.source_path, "tutorials/rust-basics/01-ownership.mdx");
        assert_eq!(t.series_order, Some(1));
    }

    #[test]
    fn missing_tutorials_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load(tmp.path(), IncludeDrafts::No),
            Err(ContentError::NoTutorialsDir(_))
        ));
    }

    #[test]
    fn hidden_and_non_markdown_files_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tutorials/a.md", &tutorial_file("A", ""));
        write_file(tmp.path(), "tutorials/.hidden.md", "not frontmatter");
        write_file(tmp.path(), "tutorials/.drafts/b.md", "not frontmatter");
        write_file(tmp.path(), "tutorials/notes.txt", "plain text");

        let content = load(tmp.path(), IncludeDrafts::No).unwrap();
        assert_eq!(tutorial_slugs(&content), ["a"]);
        assert!(content.paths.is_empty());
    }

    #[test]
    fn invalid_file_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "tutorials/broken.md",
            "---\ntitle: T\ndescription: D\ndifficulty: beginner\ndateCreated: 2025-01-15\n---\n",
        );

        let err = load(tmp.path(), IncludeDrafts::No).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken.md"), "{message}");
        assert!(message.contains("`category`"), "{message}");
    }

    #[test]
    fn escaping_tutorial_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "tutorials/a.md",
            &tutorial_file("A", "slug: ../../escaped\n"),
        );
        assert!(matches!(
            load(tmp.path(), IncludeDrafts::No),
            Err(ContentError::Tutorial {
                source: FrontmatterError::InvalidSlug { field: "slug", .. },
                ..
            })
        ));
    }

    #[test]
    fn escaping_series_is_error() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "tutorials/a.md",
            &tutorial_file("A", "series: ../../series-escape\n"),
        );
        assert!(matches!(
            load(tmp.path(), IncludeDrafts::No),
            Err(ContentError::Tutorial {
                source: FrontmatterError::InvalidSlug { field: "series", .. },
                ..
            })
        ));
    }

    #[test]
    fn escaping_path_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tutorials/a.md", &tutorial_file("A", ""));
        write_file(
            tmp.path(),
            "paths/p.md",
            "---\nslug: /abs/p\ntitle: P\ndescription: D\ntutorials: [a]\n---\n",
        );
        assert!(matches!(
            load(tmp.path(), IncludeDrafts::No),
            Err(ContentError::Path {
                source: PathError::Frontmatter(FrontmatterError::InvalidSlug { .. }),
                ..
            })
        ));
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tutorials/a.md", &tutorial_file("A", ""));
        write_file(tmp.path(), "tutorials/b.md", &tutorial_file("B", "slug: a\n"));

        match load(tmp.path(), IncludeDrafts::No) {
            Err(ContentError::DuplicateSlug {
                slug,
                first,
                second,
            }) => {
                assert_eq!(slug, "a");
                assert_eq!(first, "tutorials/a.md");
                assert_eq!(second, "tutorials/b.md");
            }
            other => panic!("expected duplicate slug error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_draft_slug_still_rejected() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "tutorials/a.md", &tutorial_file("A", ""));
        write_file(
            tmp.path(),
            "tutorials/z.md",
            &tutorial_file("Z", "slug: a\nstatus: draft\n"),
        );
        assert!(matches!(
            load(tmp.path(), IncludeDrafts::No),
            Err(ContentError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn custom_directories_from_config() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "config.toml",
            "tutorials_dir = \"guides\"\npaths_dir = \"tracks\"\n",
        );
        write_file(tmp.path(), "guides/a.md", &tutorial_file("A", ""));
        write_file(
            tmp.path(),
            "tracks/start.md",
            "---\ntitle: Start\ndescription: D\ntutorials: [a]\n---\n",
        );

        let content = load(tmp.path(), IncludeDrafts::No).unwrap();
        assert_eq!(tutorial_slugs(&content), ["a"]);
        assert_eq!(content.paths[0].slug, "start");
    }

    #[test]
    fn include_drafts_from_bool() {
        assert_eq!(IncludeDrafts::from(true), IncludeDrafts::Yes);
        assert_eq!(IncludeDrafts::from(false), IncludeDrafts::No);
        assert_eq!(IncludeDrafts::default(), IncludeDrafts::No);
    }
}
