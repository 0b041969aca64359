//! Log events delivered to the presentation layer.
//!
//! Every event is mirrored to `tracing` and, when a receiver is attached,
//! pushed onto an unbounded channel. Sending never blocks and never fails
//! the caller: a dropped receiver simply stops receiving.

use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A notification for whoever is displaying registry activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum RegistryEvent {
    /// Progress or success message.
    Info(String),
    /// Something failed; the message names the cause.
    Error(String),
    /// Display text, typically a rendered person.
    Output(String),
}

impl RegistryEvent {
    pub fn message(&self) -> &str {
        match self {
            RegistryEvent::Info(m) | RegistryEvent::Error(m) | RegistryEvent::Output(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RegistryEvent::Error(_))
    }
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Info(m) => write!(f, "INFO: {}", m),
            RegistryEvent::Error(m) => write!(f, "EXCEPTION: {}", m),
            RegistryEvent::Output(m) => write!(f, "{}", m),
        }
    }
}

/// Fire-and-forget sender for [`RegistryEvent`]s.
///
/// Cheap to clone; all clones feed the same receiver.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<RegistryEvent>>,
}

impl EventSink {
    /// Create a sink together with the receiving end of its channel.
    pub fn channel() -> (Self, UnboundedReceiver<RegistryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that only logs through `tracing`.
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.send(RegistryEvent::Info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.send(RegistryEvent::Error(message));
    }

    pub fn output(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(output = %message.trim_end(), "Registry output");
        self.send(RegistryEvent::Output(message));
    }

    fn send(&self, event: RegistryEvent) {
        if let Some(tx) = &self.tx {
            // Receiver gone means nobody is listening any more.
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_delivered_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.info("first");
        sink.error("second");
        sink.output("third");

        assert_eq!(rx.try_recv().unwrap(), RegistryEvent::Info("first".to_string()));
        assert_eq!(rx.try_recv().unwrap(), RegistryEvent::Error("second".to_string()));
        assert_eq!(rx.try_recv().unwrap(), RegistryEvent::Output("third".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.error("nobody listens");
    }

    #[test]
    fn test_silent_sink() {
        let sink = EventSink::silent();
        sink.info("only traced");
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(RegistryEvent::Info("a".into()).to_string(), "INFO: a");
        assert_eq!(RegistryEvent::Error("b".into()).to_string(), "EXCEPTION: b");
        assert_eq!(RegistryEvent::Output("c".into()).to_string(), "c");
        assert!(RegistryEvent::Error("b".into()).is_error());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&RegistryEvent::Info("loaded".into())).unwrap();
        assert_eq!(json, r#"{"kind":"info","message":"loaded"}"#);
    }
}
