pub mod migrations;
pub mod pool;

pub use migrations::{initialize_schema, run_migrations, seed_admin};
pub use pool::connect;
