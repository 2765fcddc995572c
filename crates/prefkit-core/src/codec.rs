//! Type-aware conversion between stored text and typed runtime values.
//!
//! The codec is a pure function of its inputs. It dispatches on the
//! definition's type tag and knows nothing about persistence.

use prefkit_types::prelude::*;

/// Decode a raw stored value into a typed value.
///
/// Boolean treats missing, empty, and "0" as false and everything else as
/// true. Integer falls back to 0 when the text does not parse. A malformed
/// stored JSON document is a decode error; missing JSON decodes to null.
pub fn decode(raw: Option<&str>, typ: PrefType) -> PrefResult<PrefValue> {
	match typ {
		PrefType::Boolean => {
			Ok(PrefValue::Bool(matches!(raw, Some(s) if !s.is_empty() && s != "0")))
		}
		PrefType::Integer => {
			Ok(PrefValue::Int(raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)))
		}
		PrefType::Json => match raw {
			None => Ok(PrefValue::Json(serde_json::Value::Null)),
			Some(s) => {
				let value = serde_json::from_str(s)
					.map_err(|err| Error::Decode(format!("invalid stored JSON: {}", err).into()))?;
				Ok(PrefValue::Json(value))
			}
		},
		PrefType::String | PrefType::Select => {
			Ok(PrefValue::String(raw.unwrap_or_default().to_string()))
		}
	}
}

/// Encode a typed value into its raw stored representation.
pub fn encode(value: &PrefValue, typ: PrefType) -> String {
	match typ {
		PrefType::Boolean => {
			if value.truthy() { "1".to_string() } else { "0".to_string() }
		}
		PrefType::Integer => match value {
			PrefValue::Bool(b) => {
				if *b { "1".to_string() } else { "0".to_string() }
			}
			PrefValue::Int(i) => i.to_string(),
			PrefValue::String(s) => s.clone(),
			PrefValue::Json(v) => v.to_string(),
		},
		PrefType::Json => match value {
			PrefValue::Json(v) => v.to_string(),
			PrefValue::Bool(b) => serde_json::Value::Bool(*b).to_string(),
			PrefValue::Int(i) => serde_json::Value::from(*i).to_string(),
			PrefValue::String(s) => serde_json::Value::from(s.as_str()).to_string(),
		},
		PrefType::String | PrefType::Select => match value {
			PrefValue::String(s) => s.clone(),
			PrefValue::Bool(b) => {
				if *b { "1".to_string() } else { String::new() }
			}
			PrefValue::Int(i) => i.to_string(),
			PrefValue::Json(v) => v.to_string(),
		},
	}
}


// vim: ts=4
