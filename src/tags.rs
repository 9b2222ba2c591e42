use anyhow::Result;
use itertools::Itertools;
use log::info;

use crate::{
    catalog::Catalog,
    cli::TagsArgs,
    facets::{FacetSets, display_label},
    loader::load_or_empty,
    session::Session,
    table::{self, Align, TableLayout},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Hashtag usage across the catalog, most frequent first, ties by name.
pub fn count_tags(catalog: &Catalog, top: usize) -> Vec<TagCount> {
    let mut items = catalog
        .records()
        .iter()
        .flat_map(|record| record.hashtags.iter())
        .counts()
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.clone(),
            count,
        })
        .collect::<Vec<_>>();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    if top > 0 && items.len() > top {
        items.truncate(top);
    }
    items
}

pub fn render_rows(counts: &[TagCount], facets: &FacetSets, total: usize) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|item| {
            let percent = if total == 0 {
                0.0
            } else {
                (item.count as f64 / total as f64) * 100.0
            };
            vec![
                item.tag.clone(),
                display_label(&item.tag),
                facets.classify(&item.tag).as_str().to_string(),
                item.count.to_string(),
                format!("{percent:.2}%"),
            ]
        })
        .collect()
}

pub fn execute(args: &TagsArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, None)?;
    let catalog = load_or_empty(&session.source, &session.options);
    let facets = session.config.facets();
    let counts = count_tags(&catalog, args.top);
    if counts.is_empty() {
        info!("No hashtags found");
        return Ok(());
    }
    let headers = ["tag", "label", "facet", "count", "share"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = render_rows(&counts, &facets, catalog.len());
    let layout = TableLayout::default().with_align(&[
        Align::Left,
        Align::Left,
        Align::Left,
        Align::Right,
        Align::Right,
    ]);
    table::print_table(&headers, &rows, &layout);
    info!("Listed {} hashtag(s)", counts.len());
    Ok(())
}
