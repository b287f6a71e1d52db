use std::fmt;

use serde::{Deserialize, Serialize};

/// Asset identifier (e.g. "BTC", "USDT")
///
/// Compared, hashed and ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Currency {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Currency {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
