//! Result-set queries: status filter, key search, and stable pagination

use regex::RegexBuilder;
use serde::Serialize;

use crate::engine::{MatchStatus, ReconItem};
use crate::error::Result;
use crate::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Status filter: a single concrete outcome, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(MatchStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "match" => Ok(Self::Only(MatchStatus::Match)),
            "mismatch" => Ok(Self::Only(MatchStatus::Mismatch)),
            "missing_in_a" => Ok(Self::Only(MatchStatus::MissingInA)),
            "missing_in_b" => Ok(Self::Only(MatchStatus::MissingInB)),
            _ => Err(format!(
                "Invalid status filter: {}. Use 'match', 'mismatch', 'missing_in_a', 'missing_in_b', or 'all'",
                s
            )),
        }
    }

    fn accepts(&self, status: MatchStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// An item query: status filter plus optional case-insensitive key search.
#[derive(Debug, Clone)]
pub struct ItemQuery {
    pub status: StatusFilter,
    pub search: Option<String>,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: None,
        }
    }
}

/// One page of filtered items. `total` counts the whole filtered set,
/// independent of the requested page.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPage {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub items: Vec<ReconItem>,
}

/// Clamp a requested page size into the supported range.
pub fn clamp_page_size(requested: usize) -> usize {
    requested.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// Run an item query with stable pagination over the stored item order.
///
/// Search text is escaped before pattern compilation, so regex
/// metacharacters in user input match literally.
pub fn query_items(
    items: &[ReconItem],
    query: &ItemQuery,
    page: usize,
    page_size: usize,
) -> Result<ItemPage> {
    let matcher = match query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(text) => Some(
            RegexBuilder::new(&regex::escape(text))
                .case_insensitive(true)
                .build()?,
        ),
        None => None,
    };

    let filtered: Vec<&ReconItem> = items
        .iter()
        .filter(|item| query.status.accepts(item.status))
        .filter(|item| matcher.as_ref().map_or(true, |re| re.is_match(&item.key)))
        .collect();

    let page = page.max(1);
    let page_size = clamp_page_size(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let page_items: Vec<ReconItem> = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .map(|item| (*item).clone())
        .collect();

    Ok(ItemPage {
        total: filtered.len(),
        page,
        page_size,
        items: page_items,
    })
}
