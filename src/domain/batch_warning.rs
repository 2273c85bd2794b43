use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchWarning {
    pub filename: String,
    pub page: Option<u32>,
    pub message: String,
}

impl BatchWarning {
    pub fn document(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            page: None,
            message: message.into(),
        }
    }

    pub fn page(filename: impl Into<String>, page: u32, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            page: Some(page),
            message: message.into(),
        }
    }
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "{} (page {}): {}", self.filename, page, self.message),
            None => write!(f, "{}: {}", self.filename, self.message),
        }
    }
}
