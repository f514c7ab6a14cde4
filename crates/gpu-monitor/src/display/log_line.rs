use super::StatusDisplay;
use tracing::info;

/// Status "display" for headless deployments: each new value becomes a log event
#[derive(Debug, Default)]
pub struct LogStatusLine {
    last: Option<String>,
}

impl LogStatusLine {
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl StatusDisplay for LogStatusLine {
    fn create(&mut self) {}

    fn publish(&mut self, text: &str) {
        info!(status = %text, "GPU memory");
        self.last = Some(text.to_string());
    }
}
