mod orm;
mod schema;

#[rustfmt::skip]
pub use {
    orm::{map_db_err, OrmRepo},
    schema::create_schema,
};
