use serde::Serialize;

use super::rows::{project_rows, Cell};
use crate::domain::Tournament;
use crate::pipeline::SeasonBuckets;
use crate::season::SeasonWindows;

pub const CURRENT_DATASET: &str = "current_tournaments";
pub const PAST_CURRENT_DATASET: &str = "past_current_tournaments";
pub const PAST_DATASET: &str = "past_tournaments";

pub const NAME_FIELD: &str = "Nom du tournoi";
pub const TYPE_FIELD: &str = "Type de tournoi";
pub const CLUB_FIELD: &str = "Club organisateur";
pub const ENDOWMENT_FIELD: &str = "Dotation totale (€)";
pub const DATES_FIELD: &str = "Date(s)";
pub const ADDRESS_FIELD: &str = "Adresse";
pub const RULES_FIELD: &str = "Règlement";
pub const SIGNUP_FIELD: &str = "Inscription";
pub const POSTCODE_FIELD: &str = "Code postal";
pub const CITY_FIELD: &str = "Ville";
pub const REGION_FIELD: &str = "Région";
pub const COUNT_FIELD: &str = "count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Real,
    String,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer_type: Option<String>,
}

impl Field {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            analyzer_type: None,
        }
    }
}

/// Column schema shared by the three datasets, in row-cell order
pub fn tournament_fields(windows: &SeasonWindows) -> Vec<Field> {
    vec![
        Field::new("latitude", FieldType::Real),
        Field::new("longitude", FieldType::Real),
        Field::new(NAME_FIELD, FieldType::String),
        Field::new(TYPE_FIELD, FieldType::String),
        Field::new(CLUB_FIELD, FieldType::String),
        Field {
            analyzer_type: Some("INT".to_string()),
            ..Field::new(ENDOWMENT_FIELD, FieldType::Real)
        },
        Field::new(DATES_FIELD, FieldType::Date),
        Field::new(&windows.upcoming_field_name(), FieldType::Date),
        Field::new(ADDRESS_FIELD, FieldType::String),
        Field::new(RULES_FIELD, FieldType::String),
        Field::new(SIGNUP_FIELD, FieldType::String),
        Field::new(POSTCODE_FIELD, FieldType::String),
        Field::new(CITY_FIELD, FieldType::String),
        Field::new(REGION_FIELD, FieldType::String),
        Field::new(COUNT_FIELD, FieldType::String),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTable {
    pub fields: Vec<Field>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub info: DatasetInfo,
    pub data: MapTable,
}

impl Dataset {
    pub fn project(id: &str, tournaments: &[Tournament], windows: &SeasonWindows) -> Self {
        Self {
            info: DatasetInfo { id: id.to_string() },
            data: MapTable {
                fields: tournament_fields(windows),
                rows: project_rows(tournaments)
                    .iter()
                    .map(|row| row.to_cells())
                    .collect(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }
}

/// One dataset per bucket: upcoming, past in current season, previous season
pub fn build_datasets(buckets: &SeasonBuckets, windows: &SeasonWindows) -> Vec<Dataset> {
    vec![
        Dataset::project(CURRENT_DATASET, &buckets.upcoming, windows),
        Dataset::project(PAST_CURRENT_DATASET, &buckets.past_current, windows),
        Dataset::project(PAST_DATASET, &buckets.previous, windows),
    ]
}
