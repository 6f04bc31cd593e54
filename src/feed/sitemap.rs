use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use tera::{Context, Tera};

use super::format::format_iso;
use super::templates::SITEMAP;
use crate::config::settings::SiteSettings;
use crate::domain::Tournament;

/// (path, changefreq, priority) of the fixed site pages
const MAIN_PAGES: [(&str, &str, &str); 4] = [
    ("/", "always", "1.0"),
    ("/a-propos", "monthly", "0.3"),
    ("/feed/", "daily", "0.8"),
    ("/rss.xml", "hourly", "0.7"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Main pages first, then one entry per tournament page
pub fn sitemap_entries(
    tournaments: &[Tournament],
    site: &SiteSettings,
    now: NaiveDateTime,
) -> Vec<SitemapEntry> {
    let lastmod = format_iso(&now);

    let main = MAIN_PAGES.iter().map(|(path, changefreq, priority)| SitemapEntry {
        loc: site.url(path),
        lastmod: lastmod.clone(),
        changefreq,
        priority,
    });
    let pages = tournaments.iter().map(|t| SitemapEntry {
        loc: site.tournament_url(t.id),
        lastmod: lastmod.clone(),
        changefreq: "weekly",
        priority: "0.6",
    });

    main.chain(pages).collect()
}

pub fn render_sitemap(tera: &Tera, entries: &[SitemapEntry]) -> Result<String> {
    let mut context = Context::new();
    context.insert("entries", entries);

    tera.render(SITEMAP, &context)
        .context("Failed to render sitemap")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use crate::feed::templates::load_templates;
    use chrono::NaiveDate;

    #[test]
    fn test_main_pages_then_tournaments() {
        let now = NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let tournaments = vec![TournamentBuilder::new(5).build(), TournamentBuilder::new(9).build()];

        let entries = sitemap_entries(&tournaments, &SiteSettings::default(), now);

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].loc, "https://tournois-tt.fr/");
        assert_eq!(entries[3].loc, "https://tournois-tt.fr/rss.xml");
        assert_eq!(entries[5].loc, "https://tournois-tt.fr/feed/9");
        assert!(entries[5].lastmod.starts_with("2025-10-19T06:00:00.000"));

        let xml = render_sitemap(&load_templates().unwrap(), &entries).unwrap();
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<changefreq>always</changefreq>"));
    }
}
