use std::time::Instant;
use tracing::debug;

/// Logs how long the enclosing scope took once it ends.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        debug!(
            operation = self.name,
            elapsed_ms = %self.start.elapsed().as_millis(),
            "Finished"
        );
    }
}
