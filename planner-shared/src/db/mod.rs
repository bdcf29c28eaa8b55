/// Database layer
///
/// - `pool`: SQLite connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Row types and their queries live in the `models` module at crate root level.

pub mod pool;
pub mod migrations;
