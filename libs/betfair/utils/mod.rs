//! Process utilities for long-running binaries

mod heartbeat;
mod shutdown;

pub use heartbeat::SessionHeartbeat;
pub use shutdown::ShutdownManager;
