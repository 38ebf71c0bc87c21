pub mod datastruct;
pub mod table;
