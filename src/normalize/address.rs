use regex::Regex;
use std::sync::LazyLock;

pub const UNKNOWN_REGION: &str = "Région inconnue";
pub const OVERSEAS_REGION: &str = "Outre-Mer";

const OVERSEAS_PREFIXES: [&str; 5] = ["971", "972", "973", "974", "976"];

/// Department number -> region
const REGIONS: [(&str, &[u32]); 13] = [
    ("Auvergne-Rhône-Alpes", &[1, 3, 7, 15, 26, 38, 42, 43, 63, 69, 73, 74]),
    ("Bourgogne-Franche-Comté", &[21, 25, 39, 58, 70, 71, 89, 90]),
    ("Bretagne", &[22, 29, 35, 56]),
    ("Centre-Val de Loire", &[18, 28, 36, 37, 41, 45]),
    ("Corse", &[20]),
    ("Grand Est", &[8, 10, 51, 52, 54, 55, 57, 67, 68, 88]),
    ("Hauts-de-France", &[2, 59, 60, 62, 80]),
    ("Île-de-France", &[75, 77, 78, 91, 92, 93, 94, 95]),
    ("Normandie", &[14, 27, 50, 61, 76]),
    ("Nouvelle-Aquitaine", &[16, 17, 19, 23, 24, 33, 40, 47, 64, 79, 86, 87]),
    ("Occitanie", &[9, 11, 12, 30, 31, 32, 34, 46, 48, 65, 66, 81, 82]),
    ("Pays de la Loire", &[44, 49, 53, 72, 85]),
    ("Provence-Alpes-Côte d'Azur", &[4, 5, 6, 13, 83, 84]),
];

/// Upstream spellings that the generic rules would mangle
const CITY_EXCEPTIONS: [(&str, &str); 3] = [
    ("VILLENEUVE D ASCQ", "VILLENEUVE D'ASCQ"),
    ("VILLENEUVE D'ASCQ", "VILLENEUVE D'ASCQ"),
    ("51000 - CHALONS EN CHAMPAGNE", "CHALONS-EN-CHAMPAGNE"),
];

const SPACED_ARTICLES: [&str; 3] = ["LA", "LE", "LES"];

static SAINT_ABBREVIATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bSTE?\b").ok());

/// Mainland region names, in display order
pub fn mainland_regions() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

pub fn format_postcode(postal_code: Option<&str>) -> String {
    postal_code.map(str::to_string).unwrap_or_default()
}

/// Canonical upper-case city name.
///
/// `ST`/`STE` are expanded, words are hyphenated except after `LA`, `LE`
/// and `LES`. Applying it to its own output changes nothing.
pub fn format_city_name(city: &str) -> String {
    let upper = city.trim().to_uppercase();

    if let Some((_, formatted)) = CITY_EXCEPTIONS.iter().find(|(raw, _)| *raw == upper) {
        return formatted.to_string();
    }

    let expanded = match SAINT_ABBREVIATION.as_ref() {
        Some(pattern) => pattern
            .replace_all(&upper, |caps: &regex::Captures| {
                if &caps[0] == "STE" { "SAINTE" } else { "SAINT" }
            })
            .into_owned(),
        None => upper,
    };

    let words: Vec<&str> = expanded.split_whitespace().collect();
    let mut result = String::with_capacity(expanded.len());

    for (idx, word) in words.iter().enumerate() {
        result.push_str(word);
        if idx + 1 < words.len() {
            result.push(separator_after(word));
        }
    }

    result
}

fn separator_after(word: &str) -> char {
    let last_segment = word.rsplit('-').next().unwrap_or(word);
    if SPACED_ARTICLES.contains(&last_segment) {
        ' '
    } else {
        '-'
    }
}

/// Region of a French postal code, or [`UNKNOWN_REGION`]
pub fn region_from_postal_code(postal_code: &str) -> String {
    let code = postal_code.trim();
    let prefix3: String = code.chars().take(3).collect();

    if OVERSEAS_PREFIXES.contains(&prefix3.as_str()) {
        return OVERSEAS_REGION.to_string();
    }

    let prefix2: String = code.chars().take(2).collect();
    let Ok(department) = prefix2.parse::<u32>() else {
        return UNKNOWN_REGION.to_string();
    };

    REGIONS
        .iter()
        .find(|(_, departments)| departments.contains(&department))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| UNKNOWN_REGION.to_string())
}
