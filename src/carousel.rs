//! Wrap-around cursor over a restaurant's photo and video paths.

use crate::record::MediaKind;

#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    items: &'a [String],
    index: usize,
}

impl<'a> Carousel<'a> {
    pub fn new(items: &'a [String]) -> Self {
        Self { items, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Arrows, counter and dots are only shown for more than one item.
    pub fn has_multiple(&self) -> bool {
        self.items.len() > 1
    }

    pub fn current(&self) -> Option<&'a str> {
        self.items.get(self.index).map(String::as_str)
    }

    pub fn current_kind(&self) -> Option<MediaKind> {
        self.current().map(MediaKind::from_path)
    }

    /// 1-based position, or 0 when there is nothing to show.
    pub fn position(&self) -> usize {
        if self.items.is_empty() { 0 } else { self.index + 1 }
    }

    pub fn next(&mut self) -> Option<&'a str> {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<&'a str> {
        if !self.items.is_empty() {
            self.index = self
                .index
                .checked_sub(1)
                .unwrap_or(self.items.len() - 1);
        }
        self.current()
    }

    pub fn select(&mut self, index: usize) -> Option<&'a str> {
        if index < self.items.len() {
            self.index = index;
        }
        self.current()
    }

    /// Counter text such as `2 / 5`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.position(), self.len())
    }
}
