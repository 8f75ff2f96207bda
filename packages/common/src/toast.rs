//! Transient user notifications.
//!
//! Toolbar handlers never surface errors as failures of the page; they turn
//! them into toasts. Where the toast ends up (DOM, terminal, log) is decided
//! by the [`Notifier`] the context was built with.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }

    /// Errors stay on screen longer than everything else
    pub fn default_duration(&self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_millis(5000),
            _ => Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: kind.default_duration(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    /// CSS class used by the page: `toast toast--{kind}`
    pub fn class_name(&self) -> String {
        format!("toast toast--{}", self.kind.as_str())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

/// Sink for toasts
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => tracing::error!(message = %toast.message, "toast"),
            ToastKind::Warning => tracing::warn!(message = %toast.message, "toast"),
            _ => tracing::info!(kind = toast.kind.as_str(), message = %toast.message, "toast"),
        }
    }
}

/// Keeps every toast in memory; clones share the same list
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.toasts.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_last_longer() {
        assert_eq!(Toast::error("x").duration, Duration::from_millis(5000));
        assert_eq!(Toast::success("x").duration, Duration::from_millis(3000));
    }

    #[test]
    fn test_toast_serializes_with_lowercase_kind() {
        let json = serde_json::to_value(Toast::error("Save failed")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["duration"], 5000);
        assert_eq!(Toast::error("x").class_name(), "toast toast--error");
    }

    #[test]
    fn test_recording_notifier_shares_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.notify(Toast::info("one"));
        handle.notify(Toast::success("two"));

        assert_eq!(notifier.toasts().len(), 2);
        assert_eq!(notifier.last().unwrap().kind, ToastKind::Success);
    }
}
