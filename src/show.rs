use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::{
    catalog::RestaurantDetail,
    cli::ShowArgs,
    facets::display_label,
    io_utils,
    loader::load_catalog,
    session::Session,
};

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    detail: &'a RestaurantDetail<'a>,
    media_urls: Vec<String>,
}

pub fn execute(args: &ShowArgs) -> Result<()> {
    let session = Session::resolve(&args.dataset, None)?;
    let outcome = load_catalog(&session.source, &session.options)?;
    let facets = session.config.facets();
    let detail = outcome
        .catalog
        .detail(args.id, &facets, session.config.read_more_threshold)
        .ok_or_else(|| anyhow!("Restaurant {} not found", args.id))?;

    let media_urls = detail.record.asset_urls(&session.config.asset_prefix);
    if args.json {
        return io_utils::write_json(&ShowOutput {
            detail: &detail,
            media_urls,
        });
    }
    print!("{}", render_detail(&detail, &media_urls));
    Ok(())
}

pub fn render_detail(detail: &RestaurantDetail<'_>, media_urls: &[String]) -> String {
    let record = detail.record;
    let mut lines = vec![
        format!("#{} {}", record.id, record.title),
        format!("Rating: {}", record.formatted_rating()),
        format!("Average check: {}", record.formatted_check()),
    ];
    if !detail.metro_tags.is_empty() {
        lines.push(format!("Metro: {}", labels(&detail.metro_tags)));
    }
    if !detail.cuisine_tags.is_empty() {
        lines.push(format!("Cuisine: {}", labels(&detail.cuisine_tags)));
    }

    let carousel = detail.carousel();
    if !carousel.is_empty() {
        lines.push(format!("Media ({}):", carousel.len()));
        for (url, item) in media_urls.iter().zip(&detail.media) {
            lines.push(format!("  [{}] {url}", item.kind.as_str()));
        }
    }

    if !record.text_summary.is_empty() {
        lines.push(String::new());
        lines.push(record.text_summary.clone());
        if detail.is_text_long {
            lines.push("(read more)".to_string());
        }
    }

    let links = [
        ("Telegram", &record.telegram_link),
        ("2GIS", &record.external_map_link),
        ("Website", &record.website_link),
    ];
    let present = links
        .iter()
        .filter_map(|(name, link)| link.as_deref().map(|url| format!("{name}: {url}")))
        .collect::<Vec<_>>();
    if !present.is_empty() {
        lines.push(String::new());
        lines.extend(present);
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn labels(tags: &[&str]) -> String {
    tags.iter()
        .map(|tag| display_label(tag))
        .collect::<Vec<_>>()
        .join(", ")
}
