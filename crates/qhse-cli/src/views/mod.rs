pub mod detail;
pub mod stats;
pub mod table;
