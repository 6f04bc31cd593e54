use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use tera::{Context, Tera};

use super::format::format_rfc2822;
use super::templates::RSS_FEED;
use super::view::TournamentView;
use super::SiteView;

/// RSS 2.0 channel with one item per tournament, in the given order
pub fn render_rss(
    tera: &Tera,
    site: &SiteView,
    views: &[TournamentView],
    now: NaiveDateTime,
) -> Result<String> {
    let items: Vec<TournamentView> = views
        .iter()
        .map(|view| TournamentView {
            description: view.rss_description(),
            ..view.clone()
        })
        .collect();

    let mut context = Context::new();
    context.insert("site", site);
    context.insert("items", &items);
    context.insert("build_date", &format_rfc2822(&now));

    tera.render(RSS_FEED, &context)
        .context("Failed to render RSS feed")
}
