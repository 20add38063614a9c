//! Amino JSON sign documents
//!
//! The amino pre-image is the document serialized as JSON with keys sorted
//! at every depth, no insignificant whitespace, and `&`, `<`, `>` escaped as
//! unicode sequences. Numeric fields are decimal strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::proto::Coin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<AminoMsg>,
    pub memo: String,
}

impl StdSignDoc {
    pub fn new(
        chain_id: impl Into<String>,
        account_number: u64,
        sequence: u64,
        fee: StdFee,
        msgs: Vec<AminoMsg>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_number: account_number.to_string(),
            sequence: sequence.to_string(),
            fee,
            msgs,
            memo: memo.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granter: Option<String>,
}

impl StdFee {
    pub fn new(amount: Vec<Coin>, gas: u64) -> Self {
        Self {
            amount,
            gas: gas.to_string(),
            payer: None,
            granter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: Value,
}

/// Rebuild a JSON value with object keys in sorted order
fn sort_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, sort_value(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_value).collect()),
        Value::Number(number) => Value::Number(integral_float_as_integer(number)),
        other => other,
    }
}

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Print integral floats without a fraction (`1.0` as `1`).
///
/// Non-integral floats and integral floats beyond 2^53 keep serde_json's
/// formatting, which differs from the usual JSON number rendering for
/// exponents (`1e21` rather than `1e+21`). Amino messages carry amounts as
/// strings, so such values do not appear in practice.
fn integral_float_as_integer(number: Number) -> Number {
    match number.as_f64() {
        Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            Number::from(f as i64)
        }
        _ => number,
    }
}

fn escape_characters(json: &str) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

/// Serialize any value as sorted, escaped JSON
pub fn sorted_json_stringify<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let sorted = sort_value(serde_json::to_value(value)?);
    Ok(escape_characters(&serde_json::to_string(&sorted)?))
}

/// Canonical bytes that get hashed and signed
pub fn serialize_sign_doc(sign_doc: &StdSignDoc) -> Result<Vec<u8>, serde_json::Error> {
    sorted_json_stringify(sign_doc).map(String::into_bytes)
}
