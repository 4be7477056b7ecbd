pub mod import_csv;
pub mod initdb;
pub mod serve;

pub use import_csv::import_csv;
pub use initdb::init_database;
pub use serve::{serve, ServeOptions};
