use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchStatus {
    Idle,
    Counting,
    Running,
    Done,
    Cancelled,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Idle => "IDLE",
            BatchStatus::Counting => "COUNTING",
            BatchStatus::Running => "RUNNING",
            BatchStatus::Done => "DONE",
            BatchStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Done | BatchStatus::Cancelled)
    }
}

impl FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(BatchStatus::Idle),
            "COUNTING" => Ok(BatchStatus::Counting),
            "RUNNING" => Ok(BatchStatus::Running),
            "DONE" => Ok(BatchStatus::Done),
            "CANCELLED" => Ok(BatchStatus::Cancelled),
            _ => Err(format!("Invalid batch status: {}", s)),
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
