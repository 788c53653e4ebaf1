//! A `Notifier` that records instead of logging, for asserting on the exact
//! text the consumer router built.

use std::sync::Mutex;

use tb_consumer_lib::Notifier;

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str) {
        self.sent.lock().unwrap().push(text.to_string());
    }
}
