use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use super::templates::{INDEX_PAGE, TOURNAMENT_PAGE};
use super::view::TournamentView;
use super::SiteView;

pub fn render_tournament_page(tera: &Tera, site: &SiteView, view: &TournamentView) -> Result<String> {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("t", view);

    tera.render(TOURNAMENT_PAGE, &context)
        .with_context(|| format!("Failed to render page for tournament {}", view.id))
}

/// Card list of every tournament, in the given order
pub fn render_index(tera: &Tera, site: &SiteView, views: &[TournamentView]) -> Result<String> {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("tournaments", views);
    context.insert("count", &views.len());
    context.insert("noun", if views.len() > 1 { "tournois" } else { "tournoi" });

    tera.render(INDEX_PAGE, &context)
        .context("Failed to render feed index")
}
