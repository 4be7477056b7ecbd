pub mod charts;
pub mod dataset;
pub mod format;
pub mod images;
pub mod page;
