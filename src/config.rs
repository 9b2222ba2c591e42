//! YAML configuration. Every key is optional; CLI flags win over the file.
//!
//! ```yaml
//! dataset: public/database_enriched.csv
//! asset_prefix: /piter-catalog-tma/posts/
//! page_size: 10
//! tokenizer: line-split
//! metro_stations: ["#Садовая", "#Спасская"]
//! categories:
//!   - { name: "#Кофейня", emoji: "☕" }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{DEFAULT_PAGE_SIZE, DEFAULT_READ_MORE_THRESHOLD, DEFAULT_SUGGESTIONS},
    error::ConfigError,
    facets::{Category, FacetSets, default_categories, default_metro_stations},
    tokenizer::TokenizerMode,
};

pub const DEFAULT_ASSET_PREFIX: &str = "/posts/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub dataset: Option<PathBuf>,
    pub asset_prefix: String,
    pub page_size: usize,
    pub read_more_threshold: usize,
    pub suggestion_limit: usize,
    pub tokenizer: TokenizerMode,
    pub input_encoding: Option<String>,
    pub metro_stations: Option<Vec<String>>,
    pub categories: Option<Vec<Category>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            read_more_threshold: DEFAULT_READ_MORE_THRESHOLD,
            suggestion_limit: DEFAULT_SUGGESTIONS,
            tokenizer: TokenizerMode::default(),
            input_encoding: None,
            metro_stations: None,
            categories: None,
        }
    }
}

impl CatalogConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Lookup sets, falling back to the built-in lists for anything unset.
    pub fn facets(&self) -> FacetSets {
        FacetSets::new(
            self.metro_stations
                .clone()
                .unwrap_or_else(default_metro_stations),
            self.categories.clone().unwrap_or_else(default_categories),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::TagFacet;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = CatalogConfig::from_yaml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.asset_prefix, "/posts/");
    }

    #[test]
    fn partial_yaml_overrides_selected_keys() {
        let config = CatalogConfig::from_yaml(
            "page_size: 20\ntokenizer: quote-aware\ncategories:\n  - name: \"#Tacos\"\n",
        )
        .unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.tokenizer, TokenizerMode::QuoteAware);
        assert_eq!(config.read_more_threshold, 500);

        let facets = config.facets();
        assert_eq!(facets.classify("#tacos"), TagFacet::Cuisine);
        assert_eq!(facets.classify("#Садовая"), TagFacet::Metro);
        assert_eq!(facets.classify("#Кофейня"), TagFacet::Other);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CatalogConfig::from_yaml("pagesize: 3\n").is_err());
    }
}
