//! Listing organization: standalone tutorials vs. ordered series.
//!
//! [`organize`] takes the flat tutorial list handed over by the loader and
//! produces everything a listing page needs:
//!
//! ```text
//! [Tutorial]  →  standalone   newest first (dateUpdated ?? dateCreated)
//!             →  series       one per distinct `series`, first-seen order,
//!                             members sorted by seriesOrder
//!             →  categories   sorted, deduplicated, over every tutorial
//!             →  tags         sorted, deduplicated, over every tutorial
//! ```
//!
//! ## Series index entry
//!
//! A series takes its title, description and category from its index entry:
//! the first member (after sorting) with `seriesOrder == 0`, or the first
//! member if none has order 0. The index entry stays in `tutorials`.
//!
//! Duplicate `seriesOrder` values inside one series are tolerated. Ties keep
//! input order because every sort here is stable.
//!
//! The result borrows from the input slice and is recomputed on every call.

use crate::types::{Difficulty, Tutorial, ValidationError};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// An ordered group of tutorials sharing one `series` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    /// Hardest difficulty among the members.
    pub difficulty: Difficulty,
    pub tutorials: Vec<&'a Tutorial>,
}

impl<'a> Series<'a> {
    /// The member that supplied this series' title and description.
    pub fn index_tutorial(&self) -> Option<&'a Tutorial> {
        index_tutorial(&self.tutorials)
    }
}

/// Everything a listing page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizedResult<'a> {
    pub standalone: Vec<&'a Tutorial>,
    pub series: Vec<Series<'a>>,
    pub categories: Vec<&'a str>,
    pub tags: Vec<&'a str>,
}

/// Sort series members by `seriesOrder` ascending, missing treated as 0.
///
/// Stable: members with equal order keep their input order. The organizer and
/// the navigator both sort through here.
pub fn sort_series_members(members: &mut [&Tutorial]) {
    members.sort_by_key(|t| t.series_order());
}

/// Pick the index entry of an already sorted member list.
pub(crate) fn index_tutorial<'a>(sorted: &[&'a Tutorial]) -> Option<&'a Tutorial> {
    sorted
        .iter()
        .find(|t| t.series_order() == 0)
        .or_else(|| sorted.first())
        .copied()
}

fn max_difficulty(members: &[&Tutorial]) -> Difficulty {
    members
        .iter()
        .map(|t| t.difficulty)
        .fold(Difficulty::Beginner, Difficulty::max)
}

fn build_series<'a>(slug: &'a str, mut members: Vec<&'a Tutorial>) -> Series<'a> {
    sort_series_members(&mut members);

    if let Some(pair) = members
        .windows(2)
        .find(|w| w[0].series_order() == w[1].series_order())
    {
        warn!(
            series = slug,
            order = pair[0].series_order(),
            first = %pair[0].slug,
            second = %pair[1].slug,
            "duplicate seriesOrder, keeping input order"
        );
    }

    let index = index_tutorial(&members).expect("series groups always have a member");
    Series {
        slug,
        title: &index.title,
        description: &index.description,
        category: &index.category,
        difficulty: max_difficulty(&members),
        tutorials: members,
    }
}

/// Partition tutorials into standalone entries and series, and collect the
/// category and tag vocabularies.
///
/// Fails on the first record with a missing required field, before any
/// grouping happens. The caller filters drafts beforehand.
pub fn organize(tutorials: &[Tutorial]) -> Result<OrganizedResult<'_>, ValidationError> {
    for tutorial in tutorials {
        tutorial.validate()?;
    }

    let mut standalone = Vec::new();
    let mut groups: Vec<(&str, Vec<&Tutorial>)> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for tutorial in tutorials {
        match tutorial.series_slug() {
            Some(series) => {
                let idx = *group_index.entry(series).or_insert_with(|| {
                    groups.push((series, Vec::new()));
                    groups.len() - 1
                });
                groups[idx].1.push(tutorial);
            }
            None => standalone.push(tutorial),
        }
    }

    standalone.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));

    let series: Vec<Series> = groups
        .into_iter()
        .map(|(slug, members)| build_series(slug, members))
        .collect();

    let categories: BTreeSet<&str> = tutorials.iter().map(|t| t.category.as_str()).collect();
    let tags: BTreeSet<&str> = tutorials
        .iter()
        .flat_map(|t| t.tags.iter().map(String::as_str))
        .collect();

    debug!(
        standalone = standalone.len(),
        series = series.len(),
        categories = categories.len(),
        tags = tags.len(),
        "organized tutorials"
    );

    Ok(OrganizedResult {
        standalone,
        series,
        categories: categories.into_iter().collect(),
        tags: tags.into_iter().collect(),
    })
}
