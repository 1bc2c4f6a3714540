//! Processing state for background operations.

/// Tracks the state of background listing and loading operations.
pub struct ProcessingState {
    /// Whether a worker is currently running.
    pub is_loading: bool,
    /// User-facing status message.
    pub status_text: String,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            is_loading: false,
            status_text: "Ready".to_string(),
        }
    }
}

impl ProcessingState {
    /// Mark a worker as started.
    pub fn start(&mut self, status: impl Into<String>) {
        self.is_loading = true;
        self.status_text = status.into();
    }

    /// Mark the running worker as finished.
    pub fn finish(&mut self, status: impl Into<String>) {
        self.is_loading = false;
        self.status_text = status.into();
    }
}
