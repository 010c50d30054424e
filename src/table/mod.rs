//! Live results table model
//!
//! - `names`: value-id to display-name port
//! - `appender`: record -> display row
//! - `live_table`: append-only row store

pub mod appender;
pub mod live_table;
pub mod names;

pub use appender::RowAppender;
pub use live_table::LiveTable;
pub use names::{NameResolver, NameTable, ValueKind};
