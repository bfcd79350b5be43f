use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Spinner showing the file currently being processed.
    pub fn create_scan_spinner(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({pos} files, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message("Scanning markdown files...");
        pb
    }

    /// Runs `f` with the spinner out of the way so log lines stay readable.
    pub fn suspend<F, R>(&self, pb: &ProgressBar, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            pb.suspend(f)
        } else {
            f()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_hides_spinner() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_scan_spinner();

        assert!(!manager.is_enabled());
        assert!(pb.is_hidden());
        assert_eq!(manager.suspend(&pb, || 42), 42);
    }
}
