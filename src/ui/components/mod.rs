pub mod combobox;
pub mod footer;
pub mod header;
pub mod selection_log;
pub mod shared;
