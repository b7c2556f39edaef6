//! Series navigation for individual tutorial pages.
//!
//! Given one tutorial and the full set, [`series_navigation`] returns the
//! ordered members of its series together with the tutorial's position and
//! its immediate neighbours. Member order comes from
//! [`sort_series_members`], the same routine the listing page uses, so
//! "Part N of M" always agrees with the series card.

use crate::organize::{self, sort_series_members};
use crate::types::{Tutorial, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("tutorial '{slug}' is not part of the tutorial set for series '{series}'")]
    NotFound { slug: String, series: String },
}

/// Position of one tutorial inside its series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesNavigation<'a> {
    /// All members, sorted by `seriesOrder`.
    pub series: Vec<&'a Tutorial>,
    /// 0-based index of the current tutorial in `series`.
    pub current: usize,
    pub prev: Option<&'a Tutorial>,
    pub next: Option<&'a Tutorial>,
}

impl SeriesNavigation<'_> {
    /// 1-based position, for "Part N of M" labels.
    pub fn position(&self) -> usize {
        self.current + 1
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Title of the series' index entry, as shown on listing pages.
    pub fn series_title(&self) -> Option<&str> {
        organize::index_tutorial(&self.series).map(|t| t.title.as_str())
    }
}

/// Resolve series membership and neighbours for `tutorial`.
///
/// Returns `Ok(None)` for standalone tutorials. Every record is validated
/// before any lookup. A tutorial that is not in `all` (matched by slug) is a
/// caller error, never a degenerate result.
pub fn series_navigation<'a>(
    tutorial: &Tutorial,
    all: &'a [Tutorial],
) -> Result<Option<SeriesNavigation<'a>>, NavigationError> {
    tutorial.validate()?;
    for other in all {
        other.validate()?;
    }

    let Some(series) = tutorial.series_slug() else {
        return Ok(None);
    };

    let mut members: Vec<&Tutorial> = all
        .iter()
        .filter(|t| t.series_slug() == Some(series))
        .collect();
    sort_series_members(&mut members);

    let current = members
        .iter()
        .position(|t| t.slug == tutorial.slug)
        .ok_or_else(|| NavigationError::NotFound {
            slug: tutorial.slug.clone(),
            series: series.to_string(),
        })?;

    let prev = current.checked_sub(1).map(|i| members[i]);
    let next = members.get(current + 1).copied();

    Ok(Some(SeriesNavigation {
        series: members,
        current,
        prev,
        next,
    }))
}
