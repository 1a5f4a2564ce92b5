//! Record data model.
//!
//! Records are kept exactly as the upstream store returns them; canonical
//! forms (status labels, owner fallback, parsed timestamps) are derived on
//! demand so every consumer sees the same normalization.

mod date;
mod record;
mod status;

pub use date::*;
pub use record::*;
pub use status::*;
