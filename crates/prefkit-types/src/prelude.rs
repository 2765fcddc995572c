pub use crate::error::{Error, PrefResult};
pub use crate::types::{PrefType, PrefValue, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
