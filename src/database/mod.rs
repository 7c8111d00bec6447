pub mod pool;
pub mod schema;

pub use pool::{create_memory_pool, create_pool, Database, DatabaseError};
pub use schema::initialize;
