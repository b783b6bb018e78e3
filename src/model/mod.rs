pub mod application;
pub mod catalog;
pub mod common;
pub mod course;
pub mod response;
pub mod schedule;

pub use application::*;
pub use catalog::*;
pub use common::*;
pub use course::*;
pub use response::*;
pub use schedule::*;
