use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Price sample exactly as the backend sent it.
///
/// Nothing is validated here. Missing or unparsable numbers become NaN and
/// are dropped later by [`normalize`](crate::series::normalize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(default = "nan", deserialize_with = "de_lenient_f64")]
    pub time: f64,
    #[serde(default = "nan", deserialize_with = "de_lenient_f64")]
    pub value: f64,
}

impl RawSample {
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

/// One point of the normalized series, keyed by whole unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: i64,
    pub value: f64,
}

impl PricePoint {
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Accepts numbers, numeric strings and `null`; anything unreadable is NaN.
fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientF64;

    impl<'de> Visitor<'de> for LenientF64 {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse::<f64>().unwrap_or(f64::NAN))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<f64, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientF64)
}
