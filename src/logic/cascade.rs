use crate::logic::error::AdmissionResult;
use crate::store::traits::{Deletion, DeletionStore};

/// Ordered list of row removals produced by walking a delete cascade.
///
/// Children are always pushed before their parent, so applying the steps in
/// order never leaves a dangling reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    steps: Vec<Deletion>,
}

impl DeletionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deletion: Deletion) {
        self.steps.push(deletion);
    }

    pub fn contains(&self, deletion: &Deletion) -> bool {
        self.steps.contains(deletion)
    }

    pub fn steps(&self) -> &[Deletion] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Hand the plan to the store as a single unit of work.
    pub async fn apply<S: DeletionStore + ?Sized>(&self, store: &S) -> AdmissionResult<()> {
        if self.steps.is_empty() {
            return Ok(());
        }
        log::debug!("Applying deletion plan with {} steps", self.steps.len());
        store.apply_deletions(&self.steps).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::{catalog, dates};
    use crate::model::ScheduleRefs;
    use crate::store::traits::{CourseStore, ScheduleStore};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn empty_plan_is_a_no_op() {
        let store = MemoryStore::new();
        DeletionPlan::new().apply(&store).await.unwrap();
    }

    #[tokio::test]
    async fn parent_before_child_fails_and_keeps_rows() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let refs = ScheduleRefs {
            university_id: c.university.university_id,
            college_reg_id: c.college.college_reg_id,
            program_id: c.program.program_id,
            course_id: c.course.course_id,
            branch_id: c.branch.branch_id,
        };
        let schedule = store.insert_schedule(refs, dates(2024, 7, 1)).await.unwrap();

        let mut plan = DeletionPlan::new();
        plan.push(Deletion::Course(c.course.course_id));
        plan.push(Deletion::Schedule(schedule.scheduled_id));
        assert!(plan.contains(&Deletion::Schedule(schedule.scheduled_id)));

        assert!(plan.apply(store.as_ref()).await.is_err());
        assert!(store.get_course(c.course.course_id).await.unwrap().is_some());
        assert!(store.get_schedule(schedule.scheduled_id).await.unwrap().is_some());
    }
}
