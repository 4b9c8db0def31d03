use serde::{Deserialize, Serialize};

/// Column order of the exported table
pub const MOVIE_COLUMNS: [&str; 8] = [
    "title",
    "original_title",
    "info_text",
    "year",
    "tail",
    "rating",
    "num_ratings",
    "quote",
];

/// One chart entry as extracted from a listing page.
///
/// Every field is raw text; a missing sub-element leaves its field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub original_title: String,
    pub info_text: String,
    pub year: String,
    pub tail: String,
    pub rating: String,
    pub num_ratings: String,
    pub quote: String,
}

/// Export-ready row: `rating` and `num_ratings` coerced to numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    pub title: String,
    pub original_title: String,
    pub info_text: String,
    pub year: String,
    pub tail: String,
    pub rating: Option<f64>,
    pub num_ratings: Option<u64>,
    pub quote: String,
}

impl From<&MovieRecord> for MovieRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            original_title: record.original_title.clone(),
            info_text: record.info_text.clone(),
            year: record.year.clone(),
            tail: record.tail.clone(),
            rating: coerce_float(&record.rating),
            num_ratings: coerce_count(&record.num_ratings),
            quote: record.quote.clone(),
        }
    }
}

/// Lenient float coercion; anything unparsable becomes `None`.
///
/// `inf` and `NaN` parse as floats but are rejected as well, so a rating
/// column only ever holds finite numbers or empty fields.
pub fn coerce_float(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Lenient count coercion. Accepts integral floats such as `"1234.0"`.
pub fn coerce_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(value);
    }
    coerce_float(trimmed)
        .filter(|value| *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64)
        .map(|value| value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_coerces_numeric_columns() {
        let record = MovieRecord {
            title: "肖申克的救赎".to_string(),
            rating: "9.7".to_string(),
            num_ratings: "3065215".to_string(),
            ..Default::default()
        };

        let row = MovieRow::from(&record);
        assert_eq!(row.title, "肖申克的救赎");
        assert_eq!(row.rating, Some(9.7));
        assert_eq!(row.num_ratings, Some(3_065_215));
    }

    #[test]
    fn test_invalid_numbers_become_none() {
        assert_eq!(coerce_float(""), None);
        assert_eq!(coerce_float("暂无评分"), None);
        assert_eq!(coerce_float("NaN"), None);
        assert_eq!(coerce_float("inf"), None);
        assert_eq!(coerce_float("-infinity"), None);
        assert_eq!(coerce_count(""), None);
        assert_eq!(coerce_count("-3"), None);
        assert_eq!(coerce_count("12.5"), None);
    }

    #[test]
    fn test_count_accepts_integral_float_text() {
        assert_eq!(coerce_count("1234.0"), Some(1234));
        assert_eq!(coerce_count(" 42 "), Some(42));
    }
}
