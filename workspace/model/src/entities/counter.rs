use sea_orm::entity::prelude::*;
use sea_orm::ActiveModelBehavior;

/// Daily total recorded by the Paris bicycle counters.
///
/// The date is the primary key, so the table never holds two readings for
/// the same day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    /// The day the count was recorded.
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    /// Number of cyclists counted on that day. Never negative.
    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
