use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BorrowedAt(OffsetDateTime);

impl BorrowedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

impl AsRef<OffsetDateTime> for BorrowedAt {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl From<BorrowedAt> for OffsetDateTime {
    fn from(time: BorrowedAt) -> Self {
        time.0
    }
}
