//! Command implementations.

pub mod clear;
pub mod list;
pub mod scrape;
pub mod stats;

pub use self::clear::execute_clear;
pub use self::list::execute_list;
pub use self::scrape::execute_scrape;
pub use self::stats::execute_stats;
