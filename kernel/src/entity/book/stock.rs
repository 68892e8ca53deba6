use serde::{Deserialize, Serialize};

/// Count of circulating copies currently on the shelf, never negative.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookStock(i32);

impl BookStock {
    pub fn new(stock: impl Into<i32>) -> Self {
        Self(stock.into())
    }
}

impl AsRef<i32> for BookStock {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl From<BookStock> for i32 {
    fn from(stock: BookStock) -> Self {
        stock.0
    }
}
