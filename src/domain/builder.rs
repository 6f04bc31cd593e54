use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::models::{Address, Club, Rules, Table, Tournament, TournamentType};

/// Fluent constructor for hand-written tournament records
pub struct TournamentBuilder {
    tournament: Tournament,
}

impl TournamentBuilder {
    pub fn new(id: i64) -> Self {
        let default_date = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap_or_default()
            .and_time(NaiveTime::MIN);

        Self {
            tournament: Tournament {
                id,
                identifier: None,
                name: format!("Tournoi {}", id),
                tournament_type: TournamentType::Departmental,
                club: Club {
                    name: "Club".to_string(),
                    identifier: "00000000".to_string(),
                },
                start_date: default_date,
                end_date: default_date,
                address: Address::default(),
                endowment: None,
                rules: None,
                tables: Vec::new(),
                signup_url: None,
                affiche: None,
                page: None,
            },
        }
    }

    pub fn identifier(mut self, identifier: &str) -> Self {
        self.tournament.identifier = Some(identifier.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.tournament.name = name.to_string();
        self
    }

    pub fn tournament_type(mut self, tournament_type: TournamentType) -> Self {
        self.tournament.tournament_type = tournament_type;
        self
    }

    pub fn club(mut self, name: &str, identifier: &str) -> Self {
        self.tournament.club = Club {
            name: name.to_string(),
            identifier: identifier.to_string(),
        };
        self
    }

    /// Start date; the end date follows unless set afterwards
    pub fn starts_at(mut self, start: NaiveDateTime) -> Self {
        self.tournament.start_date = start;
        self.tournament.end_date = start;
        self
    }

    pub fn ends_at(mut self, end: NaiveDateTime) -> Self {
        self.tournament.end_date = end;
        self
    }

    /// Shorthand for a midnight start on the given calendar day
    pub fn on(self, year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.starts_at(date.and_time(NaiveTime::MIN)),
            None => self,
        }
    }

    pub fn until(self, year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.ends_at(date.and_time(NaiveTime::MIN)),
            None => self,
        }
    }

    pub fn address(mut self, street: &str, postal_code: &str, locality: &str) -> Self {
        self.tournament.address.street_address = street.to_string();
        self.tournament.address.postal_code = postal_code.to_string();
        self.tournament.address.address_locality = locality.to_string();
        self
    }

    pub fn venue(mut self, description: &str) -> Self {
        self.tournament.address.disambiguating_description = Some(description.to_string());
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.tournament.address.latitude = Some(latitude);
        self.tournament.address.longitude = Some(longitude);
        self
    }

    pub fn endowment(mut self, cents: i64) -> Self {
        self.tournament.endowment = Some(cents);
        self
    }

    pub fn table_endowments(mut self, cents: &[i64]) -> Self {
        self.tournament.tables = cents
            .iter()
            .enumerate()
            .map(|(idx, endowment)| Table {
                name: format!("Tableau {}", idx + 1),
                endowment: Some(*endowment),
                ..Table::default()
            })
            .collect();
        self
    }

    pub fn rules_url(mut self, url: &str) -> Self {
        self.tournament.rules = Some(Rules {
            url: Some(url.to_string()),
        });
        self
    }

    pub fn affiche(mut self, url: &str) -> Self {
        self.tournament.affiche = Some(url.to_string());
        self
    }

    pub fn signup_url(mut self, url: &str) -> Self {
        self.tournament.signup_url = Some(url.to_string());
        self
    }

    pub fn page(mut self, url: &str) -> Self {
        self.tournament.page = Some(url.to_string());
        self
    }

    pub fn build(self) -> Tournament {
        self.tournament
    }
}
