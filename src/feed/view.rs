use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;

use super::format::{format_euros, format_long_range, format_rfc2822};
use crate::config::settings::SiteSettings;
use crate::domain::{format_date, Tournament};

const FFTT_LOGO: &str = "https://www.fftt.com/site/medias/header2017/logo.png";

/// Registration block shown on pages of tournaments not yet started
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signup {
    Link { url: String },
    Pending,
}

/// Display-ready values for one tournament, shared by pages and RSS items
#[derive(Debug, Clone, Serialize)]
pub struct TournamentView {
    pub id: i64,
    pub name: String,
    pub type_label: String,
    pub club_name: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub keywords: String,
    pub url: String,
    pub dates: String,
    pub start_date: String,
    pub end_date: String,
    pub pub_date: String,
    pub full_address: String,
    pub postal_code: String,
    pub locality: String,
    pub venue: Option<String>,
    pub endowment: Option<String>,
    pub rules_url: Option<String>,
    pub signup: Option<Signup>,
    pub json_ld: String,
}

impl TournamentView {
    pub fn new(tournament: &Tournament, site: &SiteSettings, now: NaiveDateTime) -> Self {
        let type_label = tournament.type_label().to_string();
        let address = &tournament.address;
        let endowment = match tournament.endowment_cents() {
            cents if cents > 0 => Some(format_euros(cents)),
            _ => None,
        };

        let summary = summary(tournament, endowment.as_deref());

        let mut view = Self {
            id: tournament.id,
            name: tournament.name.clone(),
            title: format!("{} - Tournoi {} | FFTT", tournament.name, type_label),
            description: format!("{}, règlement et inscription.", summary),
            summary,
            keywords: format!(
                "tennis de table, tournoi, {}, {}, {}, FFTT, ping pong, compétition",
                type_label, tournament.club.name, address.address_locality
            ),
            type_label,
            club_name: tournament.club.name.clone(),
            url: site.tournament_url(tournament.id),
            dates: format_long_range(&tournament.start_date, &tournament.end_date, " - "),
            start_date: format_date(&tournament.start_date),
            end_date: format_date(&tournament.end_date),
            pub_date: format_rfc2822(&tournament.start_date),
            full_address: [
                address.street_address.as_str(),
                address.postal_code.as_str(),
                address.address_locality.as_str(),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
            postal_code: address.postal_code.clone(),
            locality: address.address_locality.clone(),
            venue: address
                .disambiguating_description
                .clone()
                .filter(|venue| !venue.is_empty()),
            endowment,
            rules_url: tournament.rules_url().map(str::to_string),
            signup: signup(tournament, now),
            json_ld: String::new(),
        };
        view.json_ld = json_ld(tournament, &view);
        view
    }

    /// RSS item description, linking the rules when available
    pub fn rss_description(&self) -> String {
        let rules = match &self.rules_url {
            Some(url) => format!(", <a href=\"{}\">règlement (PDF)</a>", url),
            None => ", règlement".to_string(),
        };
        format!("{}{} et inscription.", self.summary, rules)
    }
}

/// Description up to the trailing "règlement et inscription" mention
fn summary(tournament: &Tournament, endowment: Option<&str>) -> String {
    let mut description = format!(
        "Tournoi de tennis de table {} organisé par {} le {} à {}.",
        tournament.type_label(),
        tournament.club.name,
        format_long_range(&tournament.start_date, &tournament.end_date, " au "),
        tournament.address.address_locality
    );
    if let Some(amount) = endowment {
        description.push_str(&format!(" Dotation: {}€.", amount));
    }
    description.push_str(" Informations pratiques");
    description
}

fn signup(tournament: &Tournament, now: NaiveDateTime) -> Option<Signup> {
    if tournament.start_date < now {
        return None;
    }

    let url = tournament
        .signup_url
        .as_deref()
        .or(tournament.page.as_deref())
        .filter(|url| !url.is_empty());

    Some(match url {
        Some(url) => Signup::Link {
            url: url.to_string(),
        },
        None => Signup::Pending,
    })
}

/// schema.org SportsEvent, safe to embed in a `<script>` element
fn json_ld(tournament: &Tournament, view: &TournamentView) -> String {
    let address = &tournament.address;

    let mut location = json!({
        "@type": "Place",
        "name": view.venue.clone().unwrap_or_else(|| address.address_locality.clone()),
        "address": {
            "@type": "PostalAddress",
            "streetAddress": address.street_address,
            "addressLocality": address.address_locality,
            "postalCode": address.postal_code,
            "addressCountry": "FR"
        }
    });
    if let Some((latitude, longitude)) = tournament.coordinates() {
        location["geo"] = json!({
            "@type": "GeoCoordinates",
            "latitude": latitude,
            "longitude": longitude
        });
    }

    let mut event = json!({
        "@context": "https://schema.org",
        "@type": "SportsEvent",
        "name": tournament.name,
        "description": view.description,
        "startDate": view.start_date,
        "endDate": view.end_date,
        "location": location,
        "organizer": {
            "@type": "Organization",
            "name": "Fédération Française de Tennis de Table",
            "alternateName": "FFTT",
            "url": "https://www.fftt.com"
        },
        "sport": "Tennis de Table",
        "url": view.url,
        "eventStatus": "EventScheduled",
        "eventAttendanceMode": "OfflineEventAttendanceMode",
        "image": FFTT_LOGO
    });
    let cents = tournament.endowment_cents();
    if cents > 0 {
        event["offers"] = json!({
            "@type": "Offer",
            "url": view.url,
            "price": format!("{}", cents as f64 / 100.0),
            "priceCurrency": "EUR",
            "availability": "https://schema.org/InStock"
        });
    }

    serde_json::to_string_pretty(&event)
        .unwrap_or_default()
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TournamentBuilder, TournamentType};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tournament() -> Tournament {
        TournamentBuilder::new(3120)
            .name("Tournoi de Noël")
            .tournament_type(TournamentType::Regional)
            .club("PPC Lyon", "06690001")
            .on(2025, 12, 6)
            .until(2025, 12, 7)
            .address("12 rue des Sports", "69003", "Lyon")
            .coordinates(45.76, 4.85)
            .endowment(150000)
            .rules_url("https://example.org/reglement.pdf")
            .build()
    }

    #[test]
    fn test_view_fields() {
        let view = TournamentView::new(&tournament(), &SiteSettings::default(), now());

        assert_eq!(view.title, "Tournoi de Noël - Tournoi Régional | FFTT");
        assert_eq!(view.url, "https://tournois-tt.fr/feed/3120");
        assert_eq!(view.dates, "6 décembre 2025 - 7 décembre 2025");
        assert_eq!(view.full_address, "12 rue des Sports, 69003, Lyon");
        assert_eq!(view.endowment.as_deref(), Some("1\u{202F}500"));
        assert_eq!(
            view.description,
            "Tournoi de tennis de table Régional organisé par PPC Lyon le 6 décembre 2025 au 7 décembre 2025 à Lyon. Dotation: 1\u{202F}500€. Informations pratiques, règlement et inscription."
        );
        assert_eq!(view.signup, Some(Signup::Pending));
    }

    #[test]
    fn test_rss_description_links_rules() {
        let view = TournamentView::new(&tournament(), &SiteSettings::default(), now());

        assert!(view
            .rss_description()
            .ends_with("Informations pratiques, <a href=\"https://example.org/reglement.pdf\">règlement (PDF)</a> et inscription."));
    }

    #[test]
    fn test_signup_hidden_once_started() {
        let past = TournamentBuilder::new(1)
            .on(2025, 3, 22)
            .signup_url("https://example.org/signup")
            .build();
        let upcoming = TournamentBuilder::new(2)
            .on(2025, 11, 22)
            .signup_url("https://example.org/signup")
            .build();

        assert_eq!(signup(&past, now()), None);
        assert_eq!(
            signup(&upcoming, now()),
            Some(Signup::Link {
                url: "https://example.org/signup".to_string()
            })
        );
    }

    #[test]
    fn test_json_ld_optional_sections() {
        let bare = TournamentBuilder::new(1).build();
        let view = TournamentView::new(&bare, &SiteSettings::default(), now());
        let ld: serde_json::Value = serde_json::from_str(&view.json_ld).unwrap();

        assert!(ld["location"].get("geo").is_none());
        assert!(ld.get("offers").is_none());

        let full = TournamentView::new(&tournament(), &SiteSettings::default(), now());
        let ld: serde_json::Value = serde_json::from_str(&full.json_ld).unwrap();
        assert_eq!(ld["location"]["geo"]["latitude"], 45.76);
        assert_eq!(ld["offers"]["price"], "1500");
    }
}
