use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Round to 2 decimal places, halves away from zero. Rounds the exact value
/// of the float, so 59.995 (stored just below the midpoint) gives 59.99.
pub fn round2(val: f64) -> f64 {
    Decimal::from_f64_retain(val)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(val)
}

/// Format a float as a rupee amount with Indian digit grouping: ₹12,34,567.89
pub fn rupees(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let paise = format!("{:.2}", abs);
    let (int_part, dec_part) = paise.split_once('.').unwrap_or((paise.as_str(), "00"));

    // Last three digits form one group, everything before groups in pairs.
    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-\u{20b9}{with_commas}.{dec_part}")
    } else {
        format!("\u{20b9}{with_commas}.{dec_part}")
    }
}

/// Display a number the way it appears in JSON output: `85`, `31.5`.
pub fn number(val: f64) -> String {
    if is_integral(val) {
        format!("{}", val as i64)
    } else {
        format!("{val}")
    }
}

fn is_integral(val: f64) -> bool {
    val.is_finite() && val.fract() == 0.0 && val.abs() < 9_007_199_254_740_992.0
}

/// Serialize integral floats as JSON integers so `85.0` is written as `85`.
pub fn serialize_number<S: Serializer>(val: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if is_integral(*val) {
        serializer.serialize_i64(*val as i64)
    } else {
        serializer.serialize_f64(*val)
    }
}

/// Serialize an ordered list of pairs as a JSON object, keeping list order.
pub fn serialize_pairs<S, K, V>(pairs: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: AsRef<str>,
    V: Serialize,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key.as_ref(), value)?;
    }
    map.end()
}

/// Like [`serialize_pairs`] for numeric values, with integral values as integers.
pub fn serialize_amount_pairs<S, K>(pairs: &[(K, f64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: AsRef<str>,
{
    struct Amount(f64);
    impl Serialize for Amount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_number(&self.0, serializer)
        }
    }

    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key.as_ref(), &Amount(*value))?;
    }
    map.end()
}
