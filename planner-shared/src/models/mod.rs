/// Database models
///
/// - `user`: accounts and password hashes
/// - `task`: to-do items, always scoped by owner
///
/// Each model owns its SQL; callers pass the pool explicitly.

pub mod user;
pub mod task;
