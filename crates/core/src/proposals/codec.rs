//! Serde adapters for proposal fields as they appear in JSON.

use jiff::Timestamp;

/// Default for records persisted without a timestamp.
pub(crate) fn epoch() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

/// Optional decimal numbers: monetary amounts and usage durations.
///
/// Accepts a JSON number or a numeric string (form inputs post text); blank or
/// unparseable values read as absent. Values are written as JSON numbers.
pub mod amount {
    use rust_decimal::{Decimal, prelude::FromPrimitive};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    /// Serialize an optional amount as a JSON number or `null`.
    ///
    /// # Errors
    ///
    /// Returns an error when the serializer rejects the value.
    #[expect(clippy::ref_option, reason = "signature required by `serde(with)`")]
    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(amount) => super::required_amount::serialize(amount, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional amount leniently.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is neither a number, a string nor `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let raw = Option::<RawAmount>::deserialize(deserializer)?;

        Ok(raw.and_then(|raw| match raw {
            RawAmount::Number(number) => Decimal::from_f64(number),
            RawAmount::Text(text) => text.trim().parse().ok(),
        }))
    }
}

/// Required monetary amounts, written as JSON numbers.
pub mod required_amount {
    use rust_decimal::{Decimal, prelude::ToPrimitive};
    use serde::{Deserializer, Serializer, de::Error as _, ser::Error as _};

    use super::amount;

    /// Serialize an amount as a JSON number; whole amounts are written without
    /// a fractional part.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount cannot be represented as a number.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let whole = value.fract().is_zero().then(|| value.to_i64()).flatten();

        if let Some(whole) = whole {
            return serializer.serialize_i64(whole);
        }

        match value.to_f64() {
            Some(number) => serializer.serialize_f64(number),
            None => Err(S::Error::custom(format!(
                "amount {value} is out of range for a JSON number"
            ))),
        }
    }

    /// Deserialize a required amount leniently.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount is absent or not numeric.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        amount::deserialize(deserializer)?
            .ok_or_else(|| D::Error::custom("requested amount is missing or not numeric"))
    }
}

/// Submission deadlines.
///
/// Read from either `YYYY-MM-DD` or a full ISO-8601 instant (whose UTC date is
/// kept), written as `YYYY-MM-DD`.
pub mod deadline {
    use jiff::{Timestamp, civil::Date, tz::TimeZone};
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    use crate::validation::ValidationError;

    /// Parse a deadline from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDeadline`] when the text is neither a
    /// date nor an instant.
    pub fn parse(value: &str) -> Result<Date, ValidationError> {
        let value = value.trim();

        if let Ok(date) = value.parse::<Date>() {
            return Ok(date);
        }

        value
            .parse::<Timestamp>()
            .map(|instant| instant.to_zoned(TimeZone::UTC).date())
            .map_err(|_parse_error| ValidationError::InvalidDeadline(value.to_owned()))
    }

    /// Serialize a deadline as an ISO date.
    ///
    /// # Errors
    ///
    /// Returns an error when the serializer rejects the value.
    pub fn serialize<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Deserialize a deadline from a date or instant string.
    ///
    /// # Errors
    ///
    /// Returns an error when the string is not a valid deadline.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;

        parse(&raw).map_err(D::Error::custom)
    }
}

/// Record timestamps; a missing or malformed value reads as the epoch.
pub mod timestamp {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a timestamp as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns an error when the serializer rejects the value.
    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Deserialize a timestamp, falling back to the epoch.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not a string or `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;

        Ok(raw
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Timestamp::UNIX_EPOCH))
    }
}
