pub mod png;
pub mod svg;
pub mod table;
