pub mod application_handlers;
pub mod catalog_handlers;
pub mod course_handlers;
pub mod handlers;
pub mod routes;
pub mod schedule_handlers;

pub use handlers::*;
pub use routes::*;
