use crate::state::Block;

/// All messages (events) that can flow through the host event bus.
///
/// Sources:
/// - Widget poll tasks   → `BlockUpdated`
/// - Config watcher task → `ConfigReloaded`
/// - Signal handler      → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    /// A widget finished a poll; `slot` is its position in the layout.
    BlockUpdated { slot: usize, block: Block },
    /// Config file changed on disk — triggers a rebuild of all widgets.
    ConfigReloaded,
    /// Graceful shutdown requested.
    Shutdown,
}
