use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryLevel {
    Info,
    Warning,
}

/// A non-fatal notice that a data source fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub level: AdvisoryLevel,
    pub message: String,
}

impl Advisory {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            AdvisoryLevel::Info => write!(f, "note: {}", self.message),
            AdvisoryLevel::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// A loaded value plus the advisory explaining any fallback taken.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub advisory: Option<Advisory>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisory: None,
        }
    }

    pub fn fallback(value: T, advisory: Advisory) -> Self {
        Self {
            value,
            advisory: Some(advisory),
        }
    }
}
