/// Route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Signup, login and logout
/// - `dashboard`: The signed-in landing page
/// - `tasks`: Add, toggle and delete tasks

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod tasks;
