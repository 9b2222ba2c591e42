use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::{
    catalog::{FilterState, Page, PageMarker},
    cli::ListArgs,
    facets::display_label,
    io_utils,
    loader::load_or_empty,
    record::RestaurantRecord,
    session::Session,
    table::{self, Align, TableLayout},
};

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    page: usize,
    total_pages: usize,
    total_items: usize,
    pages: Vec<PageMarker>,
    items: Vec<ListItem<'a>>,
}

#[derive(Debug, Serialize)]
struct ListItem<'a> {
    #[serde(flatten)]
    record: &'a RestaurantRecord,
    cover_url: Option<String>,
}

pub fn execute(args: &ListArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, args.limit)?;
    let catalog = load_or_empty(&session.source, &session.options);

    let mut state = FilterState::default();
    if let Some(tag) = &args.tag {
        state.toggle_tag(Some(tag));
    }
    if let Some(search) = &args.search {
        state.set_search(search);
    }
    let matches = catalog.query(&state.query);
    let page_size = args.page_size.unwrap_or(session.config.page_size);
    let page = Page::of(&matches, args.page, page_size);
    info!(
        "Showing page {} of {} ({} match(es))",
        page.page, page.total_pages, page.total_items
    );

    let prefix = session.config.asset_prefix.as_str();
    if args.json {
        let output = ListOutput {
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            pages: page.page_numbers(),
            items: page
                .items
                .iter()
                .map(|&record| ListItem {
                    record,
                    cover_url: record.asset_urls(prefix).into_iter().next(),
                })
                .collect(),
        };
        return io_utils::write_json(&output);
    }

    if page.items.is_empty() {
        println!("No restaurants found");
        return Ok(());
    }

    let facets = session.config.facets();
    let headers = ["id", "title", "rating", "check", "tags"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = page
        .items
        .iter()
        .map(|record| {
            let (metro, other) = facets.split(&record.hashtags);
            let tags = metro
                .into_iter()
                .chain(other)
                .map(display_label)
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                record.id.to_string(),
                record.title.clone(),
                record.formatted_rating().to_string(),
                record.formatted_check(),
                tags,
            ]
        })
        .collect::<Vec<_>>();
    let layout =
        TableLayout::default().with_align(&[Align::Right, Align::Left, Align::Right, Align::Right]);
    table::print_table(&headers, &rows, &layout);
    println!("{}", render_pager(&page.page_numbers(), page.page));
    Ok(())
}

/// Footer such as `‹ [1] 2 3 … 9 ›`.
pub fn render_pager(markers: &[PageMarker], current: usize) -> String {
    let body = markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Number(n) if *n == current => format!("[{n}]"),
            PageMarker::Number(n) => n.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("‹ {body} ›")
}
