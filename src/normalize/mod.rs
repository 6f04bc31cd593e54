pub mod address;
pub mod date;

pub use address::{
    format_city_name, format_postcode, mainland_regions, region_from_postal_code, UNKNOWN_REGION,
};
pub use date::{format_date_range, format_ddmmyyyy, normalize_date, timestamp_millis};
