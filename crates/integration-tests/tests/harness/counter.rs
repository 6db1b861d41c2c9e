//! Counter sink that remembers every key it was given

use std::sync::Mutex;

use http_exceptions::CounterSink;

#[derive(Default)]
pub struct RecordingCounter {
    keys: Mutex<Vec<String>>,
}

impl RecordingCounter {
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl CounterSink for RecordingCounter {
    fn increment(&self, key: &str) -> anyhow::Result<()> {
        self.keys.lock().unwrap().push(key.to_owned());
        Ok(())
    }
}
