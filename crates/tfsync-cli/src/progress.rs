//! Progress bar for sync batches

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tfsync_core::{SyncAction, SyncObserver};

const TEMPLATE: &str = "{prefix:>8.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// [`SyncObserver`] that advances an indicatif bar by one per key
///
/// Hidden when stderr is not a terminal.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(len: usize, action: SyncAction) -> Self {
        let bar = if std::io::stderr().is_terminal() {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::hidden())
        };
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(action.to_string());
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl SyncObserver for BatchProgress {
    fn on_item(&mut self, _action: SyncAction, key: &str) {
        self.bar.set_message(key.to_string());
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_key() {
        let mut progress = BatchProgress::new(2, SyncAction::Create);
        progress.on_item(SyncAction::Create, "a");
        progress.on_item(SyncAction::Create, "b");
        assert_eq!(progress.bar.position(), 2);
        progress.finish();
    }
}
