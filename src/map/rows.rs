use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::Tournament;
use crate::normalize::{
    format_city_name, format_date_range, format_postcode, region_from_postal_code,
    timestamp_millis,
};

/// Centre of mainland France, used for tournaments without coordinates
pub const FALLBACK_COORDINATES: (f64, f64) = (46.777138, 2.804568);

pub const SEPARATOR: &str = " | ";
pub const NO_ADDRESS: &str = "Adresse non disponible";
pub const NO_RULES: &str = "Pas de règlement";
pub const NO_SIGNUP: &str = "/";

/// One scalar of a map row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Real(f64),
    Int(i64),
    Text(String),
}

/// Tournaments sharing one map coordinate
#[derive(Debug, Clone)]
pub struct GeoGroup<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub approximate: bool,
    pub members: Vec<&'a Tournament>,
}

/// Aggregated display values for one location
#[derive(Debug, Clone, PartialEq)]
pub struct MapRow {
    pub latitude: f64,
    pub longitude: f64,
    pub names: String,
    pub types: String,
    pub clubs: String,
    pub endowments: String,
    pub dates: String,
    pub earliest_start: i64,
    pub address: String,
    pub rules: String,
    pub signups: String,
    pub postal_codes: String,
    pub city: String,
    pub region: String,
    pub count: String,
}

impl MapRow {
    /// Cells in field-table order
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Real(self.latitude),
            Cell::Real(self.longitude),
            Cell::Text(self.names.clone()),
            Cell::Text(self.types.clone()),
            Cell::Text(self.clubs.clone()),
            Cell::Text(self.endowments.clone()),
            Cell::Text(self.dates.clone()),
            Cell::Int(self.earliest_start),
            Cell::Text(self.address.clone()),
            Cell::Text(self.rules.clone()),
            Cell::Text(self.signups.clone()),
            Cell::Text(self.postal_codes.clone()),
            Cell::Text(self.city.clone()),
            Cell::Text(self.region.clone()),
            Cell::Text(self.count.clone()),
        ]
    }
}

/// Map coordinates of a tournament, substituting the fallback when missing.
/// The flag is `true` for substituted coordinates.
pub fn locate(tournament: &Tournament) -> (f64, f64, bool) {
    match tournament.coordinates() {
        Some((lat, lon)) => (lat, lon, false),
        None => (FALLBACK_COORDINATES.0, FALLBACK_COORDINATES.1, true),
    }
}

/// Group by exact coordinate pair, in first-encountered order
pub fn group_by_location(tournaments: &[Tournament]) -> Vec<GeoGroup<'_>> {
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut groups: Vec<GeoGroup> = Vec::new();

    for tournament in tournaments {
        let (latitude, longitude, approximate) = locate(tournament);
        let key = (latitude.to_bits(), longitude.to_bits());

        match index.get(&key) {
            Some(&idx) => {
                let group = &mut groups[idx];
                group.approximate |= approximate;
                group.members.push(tournament);
            }
            None => {
                index.insert(key, groups.len());
                groups.push(GeoGroup {
                    latitude,
                    longitude,
                    approximate,
                    members: vec![tournament],
                });
            }
        }
    }

    groups
}

/// One row per distinct location
pub fn project_rows(tournaments: &[Tournament]) -> Vec<MapRow> {
    let groups = group_by_location(tournaments);

    let approximate = groups.iter().filter(|g| g.approximate).count();
    if approximate > 0 {
        debug!(
            "{} of {} locations use fallback coordinates",
            approximate,
            groups.len()
        );
    }

    groups.iter().filter_map(build_row).collect()
}

fn build_row(group: &GeoGroup) -> Option<MapRow> {
    let first = *group.members.first()?;
    let members = &group.members;
    let compact = members.len() > 1;

    let postal_codes = unique(
        members
            .iter()
            .map(|t| format_postcode(Some(t.address.postal_code.as_str()))),
    );
    let region = region_from_postal_code(postal_codes.first().map(String::as_str).unwrap_or(""));

    Some(MapRow {
        latitude: group.latitude,
        longitude: group.longitude,
        names: join(members.iter().map(|t| t.name.clone())),
        types: unique(members.iter().map(|t| t.type_label().to_string())).join(SEPARATOR),
        clubs: unique(
            members
                .iter()
                .map(|t| format!("{} ({})", t.club.name, t.club.identifier)),
        )
        .join(SEPARATOR),
        endowments: join(members.iter().map(|t| t.endowment_euros().to_string())),
        dates: join(
            members
                .iter()
                .map(|t| format_date_range(&t.start_date, &t.end_date)),
        ),
        earliest_start: members
            .iter()
            .map(|t| timestamp_millis(&t.start_date))
            .min()
            .unwrap_or_default(),
        address: display_address(first),
        rules: join(members.iter().map(|t| rules_display(t, compact))),
        signups: join(members.iter().map(|t| signup_display(t, compact))),
        postal_codes: postal_codes.join(SEPARATOR),
        city: format_city_name(&first.address.address_locality),
        region,
        count: if compact {
            members.len().to_string()
        } else {
            String::new()
        },
    })
}

fn display_address(tournament: &Tournament) -> String {
    let address = &tournament.address;
    if address.street_address.trim().is_empty() {
        return NO_ADDRESS.to_string();
    }

    let venue = address
        .disambiguating_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("{} ", d))
        .unwrap_or_default();

    format!(
        "{}{}, {} {}",
        venue,
        address.street_address,
        format_postcode(Some(address.postal_code.as_str())),
        address.address_locality
    )
}

/// Rules link, else the poster, else a sentinel
fn rules_display(tournament: &Tournament, compact: bool) -> String {
    if let Some(url) = tournament.rules_url() {
        return display_url(url, compact);
    }

    if let Some(affiche) = tournament.affiche.as_deref().filter(|a| !a.is_empty()) {
        let shown = display_url(affiche, compact);
        return if tournament.rules.is_some() {
            shown
        } else {
            format!("{} (Affiche: {})", NO_RULES, shown)
        };
    }

    NO_RULES.to_string()
}

fn signup_display(tournament: &Tournament, compact: bool) -> String {
    tournament
        .signup_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| display_url(url, compact))
        .unwrap_or_else(|| NO_SIGNUP.to_string())
}

/// Grouped rows drop the scheme to save tooltip space
fn display_url(url: &str, compact: bool) -> String {
    if !compact {
        return url.to_string();
    }
    url.strip_prefix("https://").unwrap_or(url).to_string()
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(SEPARATOR)
}

/// Distinct values, first occurrence order
fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TournamentBuilder, TournamentType};

    fn at_paris(id: i64) -> TournamentBuilder {
        TournamentBuilder::new(id)
            .coordinates(48.8411737, 2.2991291)
            .address("31 rue Péclet", "75015", "Paris")
            .club("ATT XV", "08751260")
    }

    #[test]
    fn test_single_member_row() {
        let t = at_paris(1)
            .name("Les Olymping's du 15e")
            .venue("Mairie du XVème")
            .on(2025, 3, 22)
            .until(2025, 3, 23)
            .endowment(70000)
            .rules_url("https://example.org/r.pdf")
            .signup_url("https://example.org/signup")
            .build();

        let rows = project_rows(&[t.clone()]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.names, "Les Olymping's du 15e");
        assert_eq!(row.types, "Départemental");
        assert_eq!(row.clubs, "ATT XV (08751260)");
        assert_eq!(row.endowments, "700");
        assert_eq!(row.dates, "22/03/2025 au 23/03/2025");
        assert_eq!(row.earliest_start, timestamp_millis(&t.start_date));
        assert_eq!(row.address, "Mairie du XVème 31 rue Péclet, 75015 Paris");
        assert_eq!(row.rules, "https://example.org/r.pdf");
        assert_eq!(row.signups, "https://example.org/signup");
        assert_eq!(row.postal_codes, "75015");
        assert_eq!(row.city, "PARIS");
        assert_eq!(row.region, "Île-de-France");
        assert_eq!(row.count, "");
        let located = [t];
        assert!(!group_by_location(&located)[0].approximate);
    }

    #[test]
    fn test_grouped_row_aggregates_members() {
        let a = at_paris(1)
            .name("A")
            .on(2025, 5, 10)
            .rules_url("https://example.org/a.pdf")
            .build();
        let b = at_paris(2)
            .name("B")
            .tournament_type(TournamentType::Regional)
            .on(2025, 4, 5)
            .table_endowments(&[5000, 3000])
            .signup_url("https://example.org/b")
            .build();
        let c = at_paris(3).name("C").on(2025, 6, 1).build();

        let rows = project_rows(&[a, b.clone(), c]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.names, "A | B | C");
        assert_eq!(row.types, "Départemental | Régional");
        assert_eq!(row.clubs, "ATT XV (08751260)");
        assert_eq!(row.endowments, "0 | 80 | 0");
        assert_eq!(row.dates, "10/05/2025 | 05/04/2025 | 01/06/2025");
        assert_eq!(row.earliest_start, timestamp_millis(&b.start_date));
        assert_eq!(row.rules, "example.org/a.pdf | Pas de règlement | Pas de règlement");
        assert_eq!(row.signups, "/ | example.org/b | /");
        assert_eq!(row.postal_codes, "75015");
        assert_eq!(row.count, "3");
    }

    #[test]
    fn test_missing_coordinates_use_fallback() {
        let located = at_paris(1).build();
        let lost_a = TournamentBuilder::new(2).address("", "13001", "Marseille").build();
        let lost_b = TournamentBuilder::new(3).coordinates(0.0, 0.0).build();

        let all = [located, lost_a, lost_b];
        let groups = group_by_location(&all);

        assert_eq!(groups.len(), 2);
        assert_eq!((groups[1].latitude, groups[1].longitude), FALLBACK_COORDINATES);
        assert!(groups[1].approximate);
        assert_eq!(groups[1].members.len(), 2);

        let rows = project_rows(&[TournamentBuilder::new(2).address("", "13001", "Marseille").build()]);
        assert_eq!(rows[0].address, NO_ADDRESS);
        assert_eq!(rows[0].region, "Provence-Alpes-Côte d'Azur");
    }

    #[test]
    fn test_row_count_matches_distinct_locations() {
        let list: Vec<Tournament> = (0..30)
            .map(|i| {
                let builder = TournamentBuilder::new(i);
                match i % 4 {
                    0 => builder.build(),
                    n => builder.coordinates(45.0 + n as f64, 1.0).build(),
                }
            })
            .collect();

        assert_eq!(project_rows(&list).len(), 4);
        assert!(project_rows(&[]).is_empty());
    }

    #[test]
    fn test_affiche_fallbacks() {
        let with_empty_rules = at_paris(1)
            .rules_url("")
            .affiche("https://cdn.example.org/a.png")
            .build();
        let without_rules = TournamentBuilder::new(2)
            .affiche("https://cdn.example.org/b.png")
            .build();

        assert_eq!(project_rows(&[with_empty_rules])[0].rules, "https://cdn.example.org/a.png");
        assert_eq!(
            project_rows(&[without_rules])[0].rules,
            "Pas de règlement (Affiche: https://cdn.example.org/b.png)"
        );
    }

    #[test]
    fn test_grouped_urls_only_lose_leading_scheme() {
        assert_eq!(
            display_url("https://example.org/go?next=https://example.org/r.pdf", true),
            "example.org/go?next=https://example.org/r.pdf"
        );
        assert_eq!(display_url("http://example.org/r.pdf", true), "http://example.org/r.pdf");
        assert_eq!(display_url("https://example.org/r.pdf", false), "https://example.org/r.pdf");
    }

    #[test]
    fn test_cells_follow_field_order() {
        let row = &project_rows(&[at_paris(1).build()])[0];
        let cells = row.to_cells();

        assert_eq!(cells.len(), 15);
        assert_eq!(cells[0], Cell::Real(48.8411737));
        assert_eq!(cells[7], Cell::Int(row.earliest_start));
        assert_eq!(cells[14], Cell::Text(String::new()));
    }
}
