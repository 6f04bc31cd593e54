use serde::Serialize;
use serde_json::{json, Value};

use super::datasets::{
    CITY_FIELD, CLUB_FIELD, CURRENT_DATASET, ENDOWMENT_FIELD, NAME_FIELD, POSTCODE_FIELD,
    REGION_FIELD, TYPE_FIELD,
};
use crate::domain::Tournament;
use crate::normalize::{mainland_regions, timestamp_millis};
use crate::season::SeasonWindows;

/// Lower bound for the endowment slider, in euros
pub const MIN_ENDOWMENT_RANGE: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub id: String,
    pub data_id: Vec<String>,
    pub name: Vec<String>,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub value: Value,
    pub enlarged: bool,
    pub plot_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<Vec<String>>,
    pub field: FilterField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_histogram: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[i64; 2]>,
}

impl Filter {
    fn on_field(id: &str, filter_type: &str, field: &str, field_type: &str, value: Value) -> Self {
        Self {
            id: id.to_string(),
            data_id: vec![CURRENT_DATASET.to_string()],
            name: vec![field.to_string()],
            filter_type: filter_type.to_string(),
            value,
            enlarged: false,
            plot_type: "none".to_string(),
            layer_id: None,
            field: FilterField {
                name: field.to_string(),
                field_type: field_type.to_string(),
                default_value: None,
            },
            enable_histogram: None,
            domain: None,
        }
    }

    fn multi_select(id: &str, field: &str) -> Self {
        Self::on_field(id, "multiSelect", field, "string", json!([]))
    }
}

/// Filter panel for the upcoming-tournaments dataset
pub fn map_filters(upcoming: &[Tournament], windows: &SeasonWindows) -> Vec<Filter> {
    let upcoming_field = windows.upcoming_field_name();
    let max_endowment = endowment_upper_bound(upcoming);

    let mut date_filter = Filter::on_field(
        "date_filter",
        "timeRange",
        &upcoming_field,
        "timestamp",
        json!(date_range(upcoming, windows)),
    );
    date_filter.enlarged = true;
    date_filter.layer_id = Some(vec![CURRENT_DATASET.to_string()]);

    let mut endowment_filter = Filter::on_field(
        "endowment_filter",
        "range",
        ENDOWMENT_FIELD,
        "int",
        json!([0, max_endowment]),
    );
    endowment_filter.plot_type = "histogram".to_string();
    endowment_filter.enable_histogram = Some(true);
    endowment_filter.domain = Some([0, max_endowment]);

    let mut region_filter = Filter::multi_select("region_filter", REGION_FIELD);
    region_filter.field.default_value = Some(
        mainland_regions()
            .into_iter()
            .map(str::to_string)
            .collect(),
    );

    vec![
        date_filter,
        endowment_filter,
        region_filter,
        Filter::multi_select("postcode_filter", POSTCODE_FIELD),
        Filter::multi_select("city_filter", CITY_FIELD),
        Filter::multi_select("club_filter", CLUB_FIELD),
        Filter::on_field("name_filter", "input", NAME_FIELD, "string", json!("")),
        Filter::on_field("type_filter", "select", TYPE_FIELD, "string", json!([])),
    ]
}

/// Highest endowment in whole euros, rounded up, never below the slider floor
pub fn endowment_upper_bound(tournaments: &[Tournament]) -> i64 {
    tournaments
        .iter()
        .map(Tournament::endowment_euros_ceil)
        .max()
        .unwrap_or(0)
        .max(MIN_ENDOWMENT_RANGE)
}

/// Earliest start to latest end, in epoch millis. An empty list collapses
/// the range onto today.
pub fn date_range(tournaments: &[Tournament], windows: &SeasonWindows) -> [i64; 2] {
    let earliest = tournaments.iter().map(|t| timestamp_millis(&t.start_date)).min();
    let latest = tournaments.iter().map(|t| timestamp_millis(&t.end_date)).max();

    match (earliest, latest) {
        (Some(from), Some(to)) => [from, to],
        _ => {
            let today = timestamp_millis(&windows.today_midnight);
            [today, today]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use chrono::NaiveDate;

    fn windows() -> SeasonWindows {
        SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_endowment_bound() {
        assert_eq!(endowment_upper_bound(&[]), 1000);

        let rich = vec![
            TournamentBuilder::new(1).endowment(250_001).build(),
            TournamentBuilder::new(2).table_endowments(&[5000, 3000]).build(),
        ];
        assert_eq!(endowment_upper_bound(&rich), 2501);
    }

    #[test]
    fn test_date_range() {
        let list = vec![
            TournamentBuilder::new(1).on(2025, 11, 8).until(2025, 11, 9).build(),
            TournamentBuilder::new(2).on(2025, 10, 25).build(),
        ];

        let [from, to] = date_range(&list, &windows());

        assert_eq!(from, timestamp_millis(&list[1].start_date));
        assert_eq!(to, timestamp_millis(&list[0].end_date));
    }

    #[test]
    fn test_filters_target_upcoming_dataset() {
        let filters = map_filters(&[], &windows());
        let ids: Vec<&str> = filters.iter().map(|f| f.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "date_filter",
                "endowment_filter",
                "region_filter",
                "postcode_filter",
                "city_filter",
                "club_filter",
                "name_filter",
                "type_filter"
            ]
        );
        assert!(filters.iter().all(|f| f.data_id == vec![CURRENT_DATASET]));
        assert_eq!(filters[2].field.default_value.as_ref().map(Vec::len), Some(13));
    }

    #[test]
    fn test_filter_serialization() {
        let json = serde_json::to_value(&map_filters(&[], &windows())[1]).unwrap();

        assert_eq!(json["type"], "range");
        assert_eq!(json["plotType"], "histogram");
        assert_eq!(json["value"], json!([0, 1000]));
        assert_eq!(json["field"]["type"], "int");
        assert!(json.get("layerId").is_none());
    }
}
