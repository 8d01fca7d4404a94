//! Result payload model: decoding, validation and re-encoding
//!
//! The wire form is a JSON object with two required top-level fields:
//!
//! ```json
//! {
//!   "dailyAverageAQI":  { "2020-08-14": 42.0, ... },
//!   "hourlyAverageAQI": { "2020-08-14": [[0, 10.0], [1, 12.0], ...], ... }
//! }
//! ```
//!
//! Decoding parses every date key and keys both maps by `NaiveDate`, so
//! iteration order is date-ascending by construction rather than whatever
//! order the producer happened to emit.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Calendar date format used for all date keys and labels
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One hourly sample exactly as produced: a JSON array of numbers.
///
/// Well-formed samples are `[hour, aqi]` pairs. Arity is deliberately not
/// enforced at decode time; the render path checks it for the samples it
/// actually consumes and fails with `Error::MalformedEntry` there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlySample(pub Vec<f64>);

impl HourlySample {
    /// Interpret the sample as a `(hour, aqi)` pair, or `None` when it is
    /// not exactly 2 elements long.
    pub fn pair(&self) -> Option<(u32, f64)> {
        match self.0.as_slice() {
            [hour, aqi] => Some((*hour as u32, *aqi)),
            _ => None,
        }
    }

    /// Number of elements in the raw sample
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Wire-format mirror of the payload, with producer field names
#[derive(Debug, Serialize, Deserialize)]
struct RawResult {
    #[serde(rename = "dailyAverageAQI")]
    daily: BTreeMap<String, f64>,
    #[serde(rename = "hourlyAverageAQI")]
    hourly: BTreeMap<String, Vec<HourlySample>>,
}

/// Decoded result payload. Constructed once per run, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AqiResult {
    /// Daily average AQI score per calendar date, iterated date-ascending
    pub daily: BTreeMap<NaiveDate, f64>,
    /// Hourly samples per calendar date, in the order the producer emitted
    pub hourly: BTreeMap<NaiveDate, Vec<HourlySample>>,
}

impl AqiResult {
    /// Decode and validate a UTF-8 JSON payload.
    ///
    /// Fails with `Error::Decode` when the text is not well-formed JSON, a
    /// required top-level field is missing, a date key does not parse as
    /// canonical `YYYY-MM-DD`, an AQI value is not a number, or a 2-element
    /// hourly sample carries a non-integral or out-of-range hour.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawResult = serde_json::from_str(text)
            .map_err(|e| Error::Decode(format!("invalid result payload: {e}")))?;

        let mut daily = BTreeMap::new();
        for (key, score) in raw.daily {
            daily.insert(parse_date_key(&key)?, score);
        }

        let mut hourly = BTreeMap::new();
        for (key, samples) in raw.hourly {
            let date = parse_date_key(&key)?;
            for (index, sample) in samples.iter().enumerate() {
                validate_hour(date, index, sample)?;
            }
            hourly.insert(date, samples);
        }

        Ok(AqiResult { daily, hourly })
    }

    /// Re-encode the payload into its wire form.
    ///
    /// Decoding the returned text yields a value equal to `self`.
    pub fn to_json(&self) -> Result<String> {
        let raw = RawResult {
            daily: self
                .daily
                .iter()
                .map(|(date, score)| (format_date(*date), *score))
                .collect(),
            hourly: self
                .hourly
                .iter()
                .map(|(date, samples)| (format_date(*date), samples.clone()))
                .collect(),
        };
        serde_json::to_string(&raw)
            .map_err(|e| Error::Decode(format!("failed to encode result payload: {e}")))
    }

    /// Hourly samples for one date, or `None` when the date is absent
    pub fn hourly_for(&self, date: NaiveDate) -> Option<&[HourlySample]> {
        self.hourly.get(&date).map(Vec::as_slice)
    }
}

/// Format a date the way the producer keys its maps
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date key, rejecting anything that is not canonical `YYYY-MM-DD`.
///
/// `chrono` accepts single-digit months and days, so the parsed date is
/// formatted back and compared against the original key to reject
/// non-canonical spellings such as `2020-8-14`.
fn parse_date_key(key: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, DATE_FORMAT).map_err(|e| {
        Error::Decode(format!("date key {key:?} does not parse as YYYY-MM-DD: {e}"))
    })?;
    if format_date(date) != key {
        return Err(Error::Decode(format!(
            "date key {key:?} is not in canonical YYYY-MM-DD form"
        )));
    }
    Ok(date)
}

/// Validate the hour of a well-formed pair: integral and within 0..=23.
///
/// Samples of other lengths pass through here untouched; their arity is the
/// render path's concern.
fn validate_hour(date: NaiveDate, index: usize, sample: &HourlySample) -> Result<()> {
    if let [hour, _aqi] = sample.0.as_slice() {
        if hour.fract() != 0.0 || !(0.0..=23.0).contains(hour) {
            return Err(Error::Decode(format!(
                "hourly entry for {date} at index {index} has invalid hour {hour} (expected an integer in 0..=23)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    const SAMPLE: &str = r#"{
        "dailyAverageAQI": {"2020-08-14": 42, "2020-08-13": 35},
        "hourlyAverageAQI": {"2020-08-14": [[0, 10], [1, 12]]}
    }"#;

    #[test]
    fn test_decode_valid_payload() {
        let result = AqiResult::from_json(SAMPLE).unwrap();
        assert_eq!(result.daily.len(), 2);
        assert_eq!(result.daily[&date("2020-08-14")], 42.0);
        assert_eq!(result.daily[&date("2020-08-13")], 35.0);

        let samples = result.hourly_for(date("2020-08-14")).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].pair(), Some((0, 10.0)));
        assert_eq!(samples[1].pair(), Some((1, 12.0)));
    }

    #[test]
    fn test_decode_sorts_daily_keys_by_parsed_date() {
        // Keys fed out of order must iterate date-ascending
        let text = r#"{
            "dailyAverageAQI": {"2020-08-14": 3, "2020-08-12": 1, "2020-08-13": 2},
            "hourlyAverageAQI": {}
        }"#;
        let result = AqiResult::from_json(text).unwrap();
        let scores: Vec<f64> = result.daily.values().copied().collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_decode_rejects_missing_top_level_field() {
        let err = AqiResult::from_json(r#"{"dailyAverageAQI": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = AqiResult::from_json("not json at all").unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_bad_date_key() {
        let text = r#"{
            "dailyAverageAQI": {"yesterday": 42},
            "hourlyAverageAQI": {}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_non_canonical_date_key() {
        let text = r#"{
            "dailyAverageAQI": {"2020-8-14": 42},
            "hourlyAverageAQI": {}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_non_numeric_score() {
        let text = r#"{
            "dailyAverageAQI": {"2020-08-14": "high"},
            "hourlyAverageAQI": {}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_validates_hourly_date_keys_too() {
        let text = r#"{
            "dailyAverageAQI": {},
            "hourlyAverageAQI": {"14/08/2020": [[0, 10]]}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_out_of_range_hour() {
        let text = r#"{
            "dailyAverageAQI": {},
            "hourlyAverageAQI": {"2020-08-14": [[24, 10]]}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_rejects_fractional_hour() {
        let text = r#"{
            "dailyAverageAQI": {},
            "hourlyAverageAQI": {"2020-08-14": [[1.5, 10]]}
        }"#;
        let err = AqiResult::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_defers_arity_check_to_render() {
        // A 3-element sample decodes fine; only the render path rejects it
        let text = r#"{
            "dailyAverageAQI": {},
            "hourlyAverageAQI": {"2020-08-14": [[0, 10, 99]]}
        }"#;
        let result = AqiResult::from_json(text).unwrap();
        let samples = result.hourly_for(date("2020-08-14")).unwrap();
        assert_eq!(samples[0].len(), 3);
        assert_eq!(samples[0].pair(), None);
    }

    #[test]
    fn test_round_trip_preserves_value() {
        let original = AqiResult::from_json(SAMPLE).unwrap();
        let encoded = original.to_json().unwrap();
        let decoded = AqiResult::from_json(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_hourly_lookup_absent_date() {
        let result = AqiResult::from_json(SAMPLE).unwrap();
        assert!(result.hourly_for(date("2099-01-01")).is_none());
    }
}
