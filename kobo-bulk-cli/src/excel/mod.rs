//! Excel ingestion: typed cell values and header-addressed tables.

pub mod reader;
pub mod table;

pub use reader::read_table;
pub use table::{Row, Table, Value};
