//! Instrument parameter values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored for one instrument parameter.
///
/// Values are kept exactly as they were written: an integer stays an
/// integer and a float stays a float. Flags are usually written as
/// `0`/`1` integers by the simulator but real booleans are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(i) => i as f64,
            ParamValue::Float(f) => f,
        }
    }

    /// Integer view, truncating toward zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            ParamValue::Bool(b) => b as i64,
            ParamValue::Int(i) => i,
            ParamValue::Float(f) => f as i64,
        }
    }

    /// Convert a raw JSON telemetry value.
    ///
    /// Returns `None` for strings, arrays, objects and `null`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(ParamValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(ParamValue::Int)
                .or_else(|| n.as_f64().map(ParamValue::Float)),
            _ => None,
        }
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        ParamValue::Int(0)
    }
}

/// Labels use the simulator link's spelling: `True`/`False`, whole floats
/// keep `.0`, exponents are signed with at least two digits (`1e+16`).
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(true) => f.write_str("True"),
            ParamValue::Bool(false) => f.write_str("False"),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(v) => fmt_float(*v, f),
        }
    }
}

fn fmt_float(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    // Debug keeps the trailing ".0" and switches to exponents at the same
    // magnitudes; only the exponent spelling differs
    let repr = format!("{:?}", v);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&repr),
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value as f64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}
