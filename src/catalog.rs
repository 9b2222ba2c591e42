//! The loaded record set and the read-only views built on it.
//!
//! A [`Catalog`] is produced once per load and shared as `Arc<Catalog>`.
//! Searching, tag filtering and paging never touch the records; they return
//! borrowed views.

use serde::Serialize;

use crate::{
    carousel::Carousel,
    facets::{FacetSets, TagFacet},
    record::{MediaItem, RestaurantRecord},
};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SUGGESTIONS: usize = 5;
pub const DEFAULT_READ_MORE_THRESHOLD: usize = 500;
const SUGGESTION_MIN_CHARS: usize = 2;
const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl Query {
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        if let Some(tag) = &self.tag
            && !record.hashtags.iter().any(|t| t == tag)
        {
            return false;
        }
        match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(term) => title_contains(record, &term.to_lowercase()),
            None => true,
        }
    }
}

fn title_contains(record: &RestaurantRecord, lowered_term: &str) -> bool {
    record.title.to_lowercase().contains(lowered_term)
}

impl Catalog {
    /// Expects `records` already sorted by id, newest first.
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&RestaurantRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Route ids for every detail page, in catalog order.
    pub fn ids(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn query(&self, query: &Query) -> Vec<&RestaurantRecord> {
        self.records.iter().filter(|r| query.matches(r)).collect()
    }

    /// Title matches for the search box; nothing below two characters.
    pub fn suggestions(&self, term: &str, max: usize) -> Vec<&RestaurantRecord> {
        if term.chars().count() < SUGGESTION_MIN_CHARS {
            return Vec::new();
        }
        let lowered = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| title_contains(r, &lowered))
            .take(max)
            .collect()
    }

    pub fn detail<'a>(
        &'a self,
        id: i64,
        facets: &FacetSets,
        read_more_threshold: usize,
    ) -> Option<RestaurantDetail<'a>> {
        let record = self.get(id)?;
        Some(RestaurantDetail {
            record,
            metro_tags: facets.tags_of(&record.hashtags, TagFacet::Metro),
            cuisine_tags: facets.tags_of(&record.hashtags, TagFacet::Cuisine),
            is_text_long: record.has_long_text(read_more_threshold),
            media: record.media().collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail<'a> {
    #[serde(flatten)]
    pub record: &'a RestaurantRecord,
    pub metro_tags: Vec<&'a str>,
    pub cuisine_tags: Vec<&'a str>,
    pub is_text_long: bool,
    pub media: Vec<MediaItem<'a>>,
}

impl<'a> RestaurantDetail<'a> {
    pub fn carousel(&self) -> Carousel<'a> {
        Carousel::new(&self.record.photo_paths)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageMarker {
    Number(usize),
    Ellipsis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slices out 1-based `page`. Pages past the end are empty.
    pub fn of(items: &'a [T], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = items.len().div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size).min(items.len());
        let end = start.saturating_add(page_size).min(items.len());
        Self {
            items: &items[start..end],
            page,
            page_size,
            total_items: items.len(),
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn page_numbers(&self) -> Vec<PageMarker> {
        page_window(self.page, self.total_pages)
    }
}

/// Pagination window with at most five visible entries plus ellipses.
pub fn page_window(current: usize, total: usize) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Number};
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(Number).collect();
    }
    if current <= 2 {
        vec![Number(1), Number(2), Number(3), Ellipsis, Number(total)]
    } else if current >= total - 1 {
        vec![
            Number(1),
            Ellipsis,
            Number(total - 2),
            Number(total - 1),
            Number(total),
        ]
    } else {
        vec![
            Number(1),
            Ellipsis,
            Number(current),
            Number(current + 1),
            Ellipsis,
            Number(total),
        ]
    }
}

/// List-view state: active tag, search text and current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: Query,
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: Query::default(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Selecting the active tag again clears it.
    pub fn toggle_tag(&mut self, tag: Option<&str>) {
        self.query.tag = match (self.query.tag.as_deref(), tag) {
            (Some(active), Some(tag)) if active == tag => None,
            (_, tag) => tag.map(str::to_string),
        };
        self.page = 1;
    }

    /// Tag click on a card: drops the search text, then toggles the tag.
    pub fn click_tag(&mut self, tag: &str) {
        self.query.search = None;
        self.toggle_tag(Some(tag));
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search = (!term.is_empty()).then(|| term.to_string());
        self.page = 1;
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn goto(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}
