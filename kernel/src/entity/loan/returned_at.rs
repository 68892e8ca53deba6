use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReturnedAt(OffsetDateTime);

impl ReturnedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

impl AsRef<OffsetDateTime> for ReturnedAt {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl From<ReturnedAt> for OffsetDateTime {
    fn from(time: ReturnedAt) -> Self {
        time.0
    }
}
