//! Common types used throughout Prefkit.

use serde::{Deserialize, Serialize};

// UserId //
//********//

/// User identifier.
///
/// Identifiers are positive; storage layers reserve 0 for the global
/// (user-less) scope.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UserId(pub u32);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u32(self.0)
	}
}

impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(UserId(u32::deserialize(deserializer)?))
	}
}

// PrefType //
//**********//

/// Value type of a preference definition.
///
/// Stored as text; decides how raw stored values are decoded and how
/// runtime values are encoded for storage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefType {
	#[default]
	String,
	Boolean,
	Integer,
	Json,
	Select,
}

impl PrefType {
	pub fn as_str(&self) -> &'static str {
		match self {
			PrefType::String => "string",
			PrefType::Boolean => "boolean",
			PrefType::Integer => "integer",
			PrefType::Json => "json",
			PrefType::Select => "select",
		}
	}
}

impl std::fmt::Display for PrefType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl TryFrom<&str> for PrefType {
	type Error = crate::error::Error;

	fn try_from(s: &str) -> Result<Self, Self::Error> {
		match s {
			"string" => Ok(PrefType::String),
			"boolean" => Ok(PrefType::Boolean),
			"integer" => Ok(PrefType::Integer),
			"json" => Ok(PrefType::Json),
			"select" => Ok(PrefType::Select),
			_ => Err(crate::error::Error::Decode(
				format!("unknown preference type '{}'", s).into(),
			)),
		}
	}
}

// PrefValue //
//***********//

/// Typed runtime value of a preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - the owning definition carries the type
pub enum PrefValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl PrefValue {
	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			PrefValue::Bool(_) => "bool",
			PrefValue::Int(_) => "int",
			PrefValue::String(_) => "string",
			PrefValue::Json(_) => "json",
		}
	}

	/// Infer a definition type from the value's runtime shape.
	/// Used when a definition is auto-created from a bare value.
	pub fn infer_type(&self) -> PrefType {
		match self {
			PrefValue::Bool(_) => PrefType::Boolean,
			PrefValue::Int(_) => PrefType::Integer,
			PrefValue::Json(_) => PrefType::Json,
			PrefValue::String(_) => PrefType::String,
		}
	}

	/// Loose truthiness, used for boolean coercion.
	/// Empty and "0" strings are false, as is JSON null.
	pub fn truthy(&self) -> bool {
		match self {
			PrefValue::Bool(b) => *b,
			PrefValue::Int(i) => *i != 0,
			PrefValue::String(s) => !s.is_empty() && s != "0",
			PrefValue::Json(v) => !v.is_null(),
		}
	}
}

impl From<bool> for PrefValue {
	fn from(b: bool) -> Self {
		PrefValue::Bool(b)
	}
}

impl From<i64> for PrefValue {
	fn from(i: i64) -> Self {
		PrefValue::Int(i)
	}
}

impl From<&str> for PrefValue {
	fn from(s: &str) -> Self {
		PrefValue::String(s.to_string())
	}
}

impl From<String> for PrefValue {
	fn from(s: String) -> Self {
		PrefValue::String(s)
	}
}

impl From<serde_json::Value> for PrefValue {
	fn from(v: serde_json::Value) -> Self {
		PrefValue::Json(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_value_deserialize_untagged() {
		assert_eq!(serde_json::from_str::<PrefValue>("true").ok(), Some(PrefValue::Bool(true)));
		assert_eq!(serde_json::from_str::<PrefValue>("42").ok(), Some(PrefValue::Int(42)));
		assert_eq!(
			serde_json::from_str::<PrefValue>("\"dark\"").ok(),
			Some(PrefValue::String("dark".into()))
		);
		assert_eq!(
			serde_json::from_str::<PrefValue>("{\"a\":1}").ok(),
			Some(PrefValue::Json(serde_json::json!({"a": 1})))
		);
	}

	#[test]
	fn test_value_serde_round_trip() {
		for value in [
			PrefValue::Bool(false),
			PrefValue::Int(-7),
			PrefValue::String("hello".into()),
			PrefValue::Json(serde_json::json!([1, 2, 3])),
			PrefValue::Json(serde_json::Value::Null),
		] {
			let raw = serde_json::to_string(&value).expect("serialize");
			let back: PrefValue = serde_json::from_str(&raw).expect("deserialize");
			assert_eq!(back, value);
		}
	}

	#[test]
	fn test_type_text_round_trip() {
		for typ in
			[PrefType::String, PrefType::Boolean, PrefType::Integer, PrefType::Json, PrefType::Select]
		{
			assert_eq!(PrefType::try_from(typ.as_str()).ok(), Some(typ));
		}
		assert!(PrefType::try_from("float").is_err());
	}
}

// vim: ts=4
