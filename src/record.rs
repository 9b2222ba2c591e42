//! Typed restaurant records and the normalizer that builds them from
//! tokenized rows.

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Coercion, RowIssue},
    summary::text_summary,
    tokenizer::RawRow,
};

pub const PHOTO_COLUMNS: usize = 10;
pub const HASHTAG_COLUMNS: usize = 6;

pub const COL_ID: &str = "id";
pub const COL_TITLE: &str = "title_2gis";
pub const COL_RATING: &str = "rating_2gis";
pub const COL_AVERAGE_CHECK: &str = "average_check_2gis";
pub const COL_TELEGRAM: &str = "telegram_link";
pub const COL_MAP_LINK: &str = "link_1";
pub const COL_WEBSITE: &str = "link_2";
pub const COL_TEXT_HTML: &str = "text_html";

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: i64,
    pub title: String,
    pub photo_paths: Vec<String>,
    pub hashtags: Vec<String>,
    pub rating: Option<String>,
    pub average_check: Option<u64>,
    pub text_summary: String,
    pub text_html: String,
    pub telegram_link: Option<String>,
    pub external_map_link: Option<String>,
    pub website_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem<'a> {
    pub path: &'a str,
    pub kind: MediaKind,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        if VIDEO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

impl RestaurantRecord {
    pub fn media(&self) -> impl Iterator<Item = MediaItem<'_>> {
        self.photo_paths.iter().map(|path| MediaItem {
            path,
            kind: MediaKind::from_path(path),
        })
    }

    pub fn cover(&self) -> Option<&str> {
        self.photo_paths.first().map(String::as_str)
    }

    /// Joins each photo path onto the asset prefix used by the static host.
    pub fn asset_urls(&self, prefix: &str) -> Vec<String> {
        self.photo_paths
            .iter()
            .map(|path| join_asset(prefix, path))
            .collect()
    }

    pub fn has_long_text(&self, threshold: usize) -> bool {
        self.text_html.chars().count() > threshold
    }

    pub fn formatted_check(&self) -> String {
        match self.average_check {
            Some(value) => format!("{value} ₽"),
            None => "N/A".to_string(),
        }
    }

    pub fn formatted_rating(&self) -> &str {
        self.rating.as_deref().unwrap_or("N/A")
    }
}

pub fn join_asset(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Header-indexed access to a data row. Missing or unknown columns read as "".
pub struct RowView<'a> {
    index: &'a HashMap<&'a str, usize>,
    row: &'a [String],
}

impl<'a> RowView<'a> {
    pub fn get(&self, column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|&idx| self.row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn optional(&self, column: &str) -> Option<String> {
        let value = self.get(column).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn numbered(&self, prefix: &str, count: usize) -> Vec<String> {
        (1..=count)
            .map(|n| self.get(&format!("{prefix}_{n}")).trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Strips every non-digit and parses the remainder. `None` when no digits
/// remain or the number does not fit.
pub fn coerce_average_check(raw: &str) -> Option<u64> {
    let digits = raw
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Default, Clone)]
pub struct Normalized {
    pub records: Vec<RestaurantRecord>,
    pub issues: Vec<RowIssue>,
    pub coercions: Vec<Coercion>,
}

/// Builds records from tokenized rows (first row is the header) and sorts them
/// by id, newest first.
pub fn normalize(rows: &[RawRow]) -> Normalized {
    let mut normalized = Normalized::default();
    let Some((headers, data)) = rows.split_first() else {
        return normalized;
    };
    let index = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect::<HashMap<_, _>>();

    let mut seen = HashSet::new();
    for (row_idx, row) in data.iter().enumerate() {
        let view = RowView { index: &index, row };
        match build_record(&view, &mut normalized.coercions) {
            Ok(record) if !seen.insert(record.id) => {
                warn!("Row {}: duplicate id {}", row_idx + 2, record.id);
                normalized.issues.push(RowIssue::DuplicateId(record.id));
            }
            Ok(record) => normalized.records.push(record),
            Err(issue) => {
                warn!("Row {}: {issue}", row_idx + 2);
                normalized.issues.push(issue);
            }
        }
    }

    normalized.records.sort_by(|a, b| b.id.cmp(&a.id));
    normalized
}

fn build_record(
    view: &RowView<'_>,
    coercions: &mut Vec<Coercion>,
) -> Result<RestaurantRecord, RowIssue> {
    let raw_id = view.get(COL_ID).trim();
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| RowIssue::InvalidId(raw_id.to_string()))?;
    let title = view.get(COL_TITLE).trim();
    if title.is_empty() {
        return Err(RowIssue::MissingTitle);
    }

    let raw_check = view.get(COL_AVERAGE_CHECK).trim();
    let average_check = coerce_average_check(raw_check);
    if average_check.is_none() && !raw_check.is_empty() {
        coercions.push(Coercion {
            record_id: id,
            column: COL_AVERAGE_CHECK,
            raw: raw_check.to_string(),
        });
    }

    let text_html = view.get(COL_TEXT_HTML).to_string();
    Ok(RestaurantRecord {
        id,
        title: title.to_string(),
        photo_paths: view.numbered("photo_path", PHOTO_COLUMNS),
        hashtags: view.numbered("hashtag", HASHTAG_COLUMNS),
        rating: view.optional(COL_RATING),
        average_check,
        text_summary: text_summary(&text_html),
        text_html,
        telegram_link: view.optional(COL_TELEGRAM),
        external_map_link: view.optional(COL_MAP_LINK),
        website_link: view.optional(COL_WEBSITE),
    })
}
