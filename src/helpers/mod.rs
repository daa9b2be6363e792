//! Presentation helpers
//!
//! Pure functions that turn normalized posts into display-ready values:
//! date formatting, reading time, list pagination and rich text.

mod date;
mod pagination;
mod reading_time;
mod richtext;

pub use date::*;
pub use pagination::*;
pub use reading_time::*;
pub use richtext::*;
