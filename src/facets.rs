//! Hashtag facets: metro stations and cuisine categories.
//!
//! Hashtags in the dataset are free-form (`#Невский_проспект`, `#Кофейня`).
//! They are classified by case-insensitive membership in two lookup sets. The
//! built-in sets cover the St. Petersburg metro and the cuisine chips shown on
//! the list view; both can be replaced through the config file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFacet {
    Metro,
    Cuisine,
    Other,
}

impl TagFacet {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagFacet::Metro => "metro",
            TagFacet::Cuisine => "cuisine",
            TagFacet::Other => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacetSets {
    categories: Vec<Category>,
    metro_lower: HashSet<String>,
    category_lower: HashSet<String>,
}

const DEFAULT_METRO_STATIONS: &[&str] = &[
    "#Адмиралтейская",
    "#Академическая",
    "#Балтийская",
    "#Василеостровская",
    "#Владимирская",
    "#Достоевская",
    "#Звенигородская",
    "#Горьковская",
    "#Гостиный_двор",
    "#Лиговский_проспект",
    "#Маяковская",
    "#Московская",
    "#Невский_проспект",
    "#Петроградская",
    "#Площадь_Восстания",
    "#Площадь_Александра_Невского",
    "#Пушкинская",
    "#Садовая",
    "#Сенная_площадь",
    "#Спасская",
    "#Технологический_институт",
    "#Фрунзенская",
    "#Чернышевская",
    "#Чкаловская",
    "#Спортивная",
    "#Электросила",
    "#Парк_Победы",
    "#Удельная",
    "#Черная_речка",
    "#Пионерская",
    "#Приморская",
    "#Новочеркасская",
    "#Ладожская",
    "#Выборгская",
    "#Лесная",
    "#Крестовский_остров",
    "#Старая_Деревня",
    "#Обводный_канал",
    "#Бухарестская",
    "#Международная",
    "#Волковская",
];

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("#Кофейня", "☕"),
    ("#Завтраки", "🍳"),
    ("#Пекарня", "🥐"),
    ("#Итальянская_кухня", "🍝"),
    ("#Грузинская_кухня", "🥟"),
    ("#Азиатская_кухня", "🍜"),
    ("#Японская_кухня", "🍣"),
    ("#Русская_кухня", "🥘"),
    ("#Бургеры", "🍔"),
    ("#Пицца", "🍕"),
    ("#Стейки", "🥩"),
    ("#Морепродукты", "🦐"),
    ("#Шаверма_и_гриль", "🌯"),
    ("#Десерты", "🍰"),
    ("#Бар", "🍸"),
    ("#Вегетарианское", "🥗"),
];

pub fn default_metro_stations() -> Vec<String> {
    DEFAULT_METRO_STATIONS.iter().map(|s| s.to_string()).collect()
}

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, emoji)| Category {
            name: name.to_string(),
            emoji: emoji.to_string(),
        })
        .collect()
}

impl Default for FacetSets {
    fn default() -> Self {
        FacetSets::new(default_metro_stations(), default_categories())
    }
}

impl FacetSets {
    pub fn new(metro_stations: Vec<String>, categories: Vec<Category>) -> Self {
        let metro_lower = metro_stations.iter().map(|s| s.to_lowercase()).collect();
        let category_lower = categories.iter().map(|c| c.name.to_lowercase()).collect();
        Self {
            categories,
            metro_lower,
            category_lower,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn classify(&self, tag: &str) -> TagFacet {
        let lowered = tag.to_lowercase();
        if self.metro_lower.contains(&lowered) {
            TagFacet::Metro
        } else if self.category_lower.contains(&lowered) {
            TagFacet::Cuisine
        } else {
            TagFacet::Other
        }
    }

    /// Card ordering: metro tags first, every other tag after them.
    pub fn split<'a>(&self, hashtags: &'a [String]) -> (Vec<&'a str>, Vec<&'a str>) {
        hashtags
            .iter()
            .map(String::as_str)
            .partition(|tag| self.classify(tag) == TagFacet::Metro)
    }

    pub fn tags_of<'a>(&self, hashtags: &'a [String], facet: TagFacet) -> Vec<&'a str> {
        hashtags
            .iter()
            .map(String::as_str)
            .filter(|tag| self.classify(tag) == facet)
            .collect()
    }
}

/// Human-readable form of a hashtag: `#` removed, `_` shown as spaces.
pub fn display_label(tag: &str) -> String {
    tag.replace('#', "").replace('_', " ")
}
