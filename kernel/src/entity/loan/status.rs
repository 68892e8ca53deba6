use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle state of a loan record. Legal paths are
/// `Pending -> Borrowed -> Returned` and `Pending -> Rejected`; terminal
/// states admit no further move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Pending,
    Borrowed,
    Returned,
    Rejected,
}

impl LoanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Returned | LoanStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Borrowed => "BORROWED",
            LoanStatus::Returned => "RETURNED",
            LoanStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(LoanStatus::Pending),
            "BORROWED" => Some(LoanStatus::Borrowed),
            "RETURNED" => Some(LoanStatus::Returned),
            "REJECTED" => Some(LoanStatus::Rejected),
            _ => None,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use crate::entity::LoanStatus;

    #[test]
    fn only_returned_and_rejected_are_terminal() {
        assert!(!LoanStatus::Pending.is_terminal());
        assert!(!LoanStatus::Borrowed.is_terminal());
        assert!(LoanStatus::Returned.is_terminal());
        assert!(LoanStatus::Rejected.is_terminal());
    }

    #[test]
    fn wire_names_round_trip() {
        for status in [
            LoanStatus::Pending,
            LoanStatus::Borrowed,
            LoanStatus::Returned,
            LoanStatus::Rejected,
        ] {
            assert_eq!(LoanStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(LoanStatus::parse("OVERDUE"), None);
    }
}
