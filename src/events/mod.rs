//! Notices emitted while editing.
//!
//! Graph edits never fail with an error; rejected edits and persistence
//! failures are reported to subscribers as [`Notice`]s through a
//! [`Notifier`].

mod notifier;

pub use notifier::{NoticeHandle, Notifier};

use serde::{Deserialize, Serialize};

use crate::{Rejection, utils};

/// Generic event wrapper.
#[derive(Debug, Clone)]
pub struct Event<T> {
    inner: T,
}

/// Severity of a notice.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoticeLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// User-facing notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notice {
    /// How loudly the UI should surface this notice.
    pub level: NoticeLevel,
    /// Machine-readable reason, e.g. `start_fan_out`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Timestamp in milliseconds.
    pub timestamp: i64,
}

impl<T> std::ops::Deref for Event<T>
where
    T: std::fmt::Debug + Clone,
{
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> Event<T>
where
    T: std::fmt::Debug + Clone,
{
    pub fn new(inner: &T) -> Self {
        Self {
            inner: inner.clone(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl Notice {
    pub fn new(
        level: NoticeLevel,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            code: code.into(),
            message: message.into(),
            timestamp: utils::time::time_millis(),
        }
    }

    pub fn info(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Info, code, message)
    }

    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Warning, code, message)
    }

    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Error, code, message)
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&Rejection> for Notice {
    fn from(rejection: &Rejection) -> Self {
        Notice::warning(rejection.as_ref(), rejection.to_string())
    }
}
