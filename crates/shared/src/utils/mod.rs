mod gracefull;
mod logs;
mod metrics;

pub use self::gracefull::shutdown_signal;
pub use self::logs::Logger;
pub use self::metrics::Metrics;
