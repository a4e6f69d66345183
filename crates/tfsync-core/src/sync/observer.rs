//! Per-item progress notifications

use super::batch::SyncAction;

/// Receives one notification per processed key
///
/// `on_item` fires after the key's outgoing values are computed and before
/// its remote call returns, so observers report progress optimistically.
pub trait SyncObserver {
    fn on_item(&mut self, action: SyncAction, key: &str);
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_item(&mut self, _action: SyncAction, _key: &str) {}
}
