//! Competition value type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping label attached to an event (e.g. "English Premier League")
///
/// Immutable after construction and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competition {
    name: String,
    id: u64,
}

impl Competition {
    /// Create a competition. The name is trimmed.
    pub fn new(name: impl AsRef<str>, id: u64) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
