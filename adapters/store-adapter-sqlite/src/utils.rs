//! Shared sqlx helpers

use prefkit::prelude::*;

/// Storage key of the global override row
pub(crate) const GLOBAL_USER: i64 = 0;

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map the optional user to its storage key. User identifiers are
/// positive, 0 marks the global row.
pub(crate) fn user_key(user_id: Option<UserId>) -> i64 {
	user_id.map_or(GLOBAL_USER, |uid| i64::from(uid.0))
}

// vim: ts=4
