pub mod application_ops;
pub mod cascade;
pub mod catalog_ops;
pub mod compose;
pub mod course_ops;
pub mod error;
pub mod schedule_ops;

#[cfg(test)]
pub(crate) mod test_support;

pub use application_ops::ApplicationOperations;
pub use cascade::DeletionPlan;
pub use catalog_ops::CatalogOperations;
pub use compose::ScheduleGraph;
pub use course_ops::CourseOperations;
pub use error::{AdmissionError, AdmissionResult};
pub use schedule_ops::ScheduleOperations;

use std::sync::Arc;

use crate::store::traits::Store;

/// Every operation group wired onto one shared store. Course deletes reach
/// into schedules, which reach into applications, so the groups share
/// instances rather than each building their own.
pub struct AdmissionServices<S> {
    pub catalog: CatalogOperations<S>,
    pub courses: CourseOperations<S>,
    pub schedules: ScheduleOperations<S>,
    pub applications: ApplicationOperations<S>,
}

impl<S: Store> AdmissionServices<S> {
    pub fn new(store: Arc<S>) -> Self {
        let applications = ApplicationOperations::new(Arc::clone(&store));
        let schedules = ScheduleOperations::new(Arc::clone(&store), applications.clone());
        let courses = CourseOperations::new(Arc::clone(&store), schedules.clone());
        let catalog = CatalogOperations::new(store);

        Self {
            catalog,
            courses,
            schedules,
            applications,
        }
    }
}
