//! Root of the SeaORM entity modules.

pub mod counter;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::counter::Entity as Counter;
}
