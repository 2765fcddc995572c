//! Engine configuration.
//!
//! Passed into [`PrefService::new`](crate::service::PrefService::new) by the
//! caller; the engine never reads ambient configuration.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrefConfig {
	/// Whether resolved values are cached at all
	pub cache_enabled: bool,
	/// Time-to-live of cached values, in seconds
	pub cache_ttl: u64,
	/// Prefix of every cache key written by the engine
	pub cache_prefix: Box<str>,
	/// Locale used for labels and descriptions when none is requested
	pub default_locale: Box<str>,
	/// Locale tried when the requested locale has no translation
	pub fallback_locale: Box<str>,
}

impl Default for PrefConfig {
	fn default() -> Self {
		PrefConfig {
			cache_enabled: true,
			cache_ttl: 3600,
			cache_prefix: "prefkit".into(),
			default_locale: "en".into(),
			fallback_locale: "en".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_config_uses_defaults() {
		let config: PrefConfig =
			serde_json::from_str(r#"{"cacheTtl": 60, "defaultLocale": "ca"}"#).expect("parse");
		assert!(config.cache_enabled);
		assert_eq!(config.cache_ttl, 60);
		assert_eq!(&*config.cache_prefix, "prefkit");
		assert_eq!(&*config.default_locale, "ca");
		assert_eq!(&*config.fallback_locale, "en");
	}
}

// vim: ts=4
