//! Global constants for the classification labeler

use std::time::Duration;

/// Characters eligible for label shortcuts and color hashing, in hash order.
pub const LABEL_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890";

/// How long a clicked label stays enlarged
pub const ENLARGE_DURATION: Duration = Duration::from_millis(100);
