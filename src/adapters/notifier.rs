use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex};

/// Prints notifications to stdout, the way the console prototype shows them.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("[NOTIFICATION] {}", message);
    }
}

/// Routes notifications into the tracing pipeline instead of stdout.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "roadside_assist::notification", "{}", message);
    }
}

/// Keeps every message in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        // 鎖中毒時直接丟棄訊息，通知是 best effort
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(handle.messages(), vec!["first", "second"]);

        handle.clear();
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_boxed_notifier_forwards() {
        let recorder = RecordingNotifier::new();
        let boxed: Box<dyn Notifier> = Box::new(recorder.clone());
        boxed.notify("hello");
        assert_eq!(recorder.messages(), vec!["hello"]);
    }
}
