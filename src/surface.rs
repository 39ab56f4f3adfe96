use crate::dispatch::Presentation;
use async_trait::async_trait;

/// A host capability that displays a configured result, e.g. a modal dialog
/// or a terminal view.
#[async_trait]
pub trait PresentationSurface: Send + Sync {
    /// Shows the presentation and completes once the user dismisses it.
    async fn show(&self, presentation: Presentation);
}

/// A user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub label: String,
    pub theme: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            label: "Error".to_string(),
            theme: "error".to_string(),
        }
    }
}

/// The single channel through which failures reach the user.
pub trait ErrorSink: Send + Sync {
    fn alert(&self, alert: Alert);
}
