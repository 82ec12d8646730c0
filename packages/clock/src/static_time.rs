//! Static time for the application start.
use std::time::SystemTime;

lazy_static! {
    /// The time when the application started.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}
