use std::sync::Arc;

use crate::logic::cascade::DeletionPlan;
use crate::logic::error::{non_empty, require, AdmissionError, AdmissionResult};
use crate::logic::schedule_ops::ScheduleOperations;
use crate::model::{
    Branch, Course, CourseResponse, EntityKind, Id, NewCourse, ScheduleFilter,
};
use crate::store::traits::{Deletion, DuplicateCourseName, Store};

/// Courses offered under a program at a college.
pub struct CourseOperations<S> {
    store: Arc<S>,
    schedules: ScheduleOperations<S>,
}

impl<S> Clone for CourseOperations<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            schedules: self.schedules.clone(),
        }
    }
}

impl<S: Store> CourseOperations<S> {
    pub fn new(store: Arc<S>, schedules: ScheduleOperations<S>) -> Self {
        Self { store, schedules }
    }

    /// Attach a new course to a program and a college. Names are unique per
    /// program, ignoring case.
    pub async fn add_course(
        &self,
        college_id: Id,
        program_id: Id,
        course: NewCourse,
    ) -> AdmissionResult<CourseResponse> {
        let college = require(
            self.store.get_college(college_id).await?,
            EntityKind::College,
            college_id,
        )?;
        let program = require(
            self.store.get_program(program_id).await?,
            EntityKind::Program,
            program_id,
        )?;

        self.ensure_name_free(program.program_id, &course.course_name, None)
            .await?;

        let course = self
            .store
            .insert_course(program.program_id, college.college_reg_id, course)
            .await
            .map_err(already_exists)?;
        log::info!(
            "Course {} '{}' added to program {} at college {}",
            course.course_id,
            course.course_name,
            program_id,
            college_id
        );
        Ok(course.into())
    }

    pub async fn view_all_courses(&self) -> AdmissionResult<Vec<CourseResponse>> {
        let courses = self.store.list_courses().await?;
        let courses = non_empty(courses, || "No Courses found".to_string())?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> AdmissionResult<CourseResponse> {
        let course = self.get_by_name(name).await?;
        Ok(course.into())
    }

    pub async fn find_by_id(&self, id: Id) -> AdmissionResult<CourseResponse> {
        let course = self.get(id).await?;
        Ok(course.into())
    }

    pub async fn find_by_eligibility(
        &self,
        eligibility: &str,
    ) -> AdmissionResult<Vec<CourseResponse>> {
        let courses = self.store.list_courses_by_eligibility(eligibility).await?;
        let courses = non_empty(courses, || format!("No Details by {} is present", eligibility))?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    /// Overwrite name and eligibility, returning the course id. The new name
    /// must not belong to another course of the same program.
    pub async fn update_course(&self, id: Id, fields: NewCourse) -> AdmissionResult<Id> {
        let mut course = self.get(id).await?;
        self.ensure_name_free(course.program_id, &fields.course_name, Some(id))
            .await?;
        course.course_name = fields.course_name;
        course.eligibility = fields.eligibility;
        self.store
            .update_course(&course)
            .await
            .map_err(already_exists)?;
        log::info!("Course {} updated", id);
        Ok(id)
    }

    pub async fn delete_by_id(&self, id: Id) -> AdmissionResult<()> {
        let course = self.get(id).await?;
        self.delete(course).await
    }

    pub async fn delete_by_name(&self, name: &str) -> AdmissionResult<()> {
        let course = self.get_by_name(name).await?;
        self.delete(course).await
    }

    /// Record the removal of a course after its schedules (and their
    /// applications) and then its branches.
    pub async fn plan_delete(&self, course: &Course, plan: &mut DeletionPlan) -> AdmissionResult<()> {
        let schedules = self
            .store
            .list_schedules(Some(ScheduleFilter::CourseId(course.course_id)))
            .await?;
        log::debug!(
            "Course {} cascades to {} program schedules",
            course.course_id,
            schedules.len()
        );
        for schedule in schedules {
            self.schedules.plan_delete(schedule.scheduled_id, plan).await?;
        }

        // A branch can also be scheduled under another course id.
        for branch in self.store.list_branches_for_course(course.course_id).await? {
            let schedules = self
                .store
                .list_schedules(Some(ScheduleFilter::BranchId(branch.branch_id)))
                .await?;
            for schedule in schedules {
                if !plan.contains(&Deletion::Schedule(schedule.scheduled_id)) {
                    self.schedules.plan_delete(schedule.scheduled_id, plan).await?;
                }
            }
            plan.push(Deletion::Branch(branch.branch_id));
        }

        plan.push(Deletion::Course(course.course_id));
        Ok(())
    }

    pub async fn list_branches(&self, course_id: Id) -> AdmissionResult<Vec<Branch>> {
        let course = self.get(course_id).await?;
        Ok(self.store.list_branches_for_course(course.course_id).await?)
    }

    pub async fn list_by_program(&self, program_id: Id) -> AdmissionResult<Vec<CourseResponse>> {
        let program = require(
            self.store.get_program(program_id).await?,
            EntityKind::Program,
            program_id,
        )?;
        let courses = self
            .store
            .list_courses_for_program(program.program_id)
            .await?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    async fn delete(&self, course: Course) -> AdmissionResult<()> {
        let mut plan = DeletionPlan::new();
        self.plan_delete(&course, &mut plan).await?;
        plan.apply(self.store.as_ref()).await?;
        log::info!(
            "Deleted course {} '{}' ({} rows)",
            course.course_id,
            course.course_name,
            plan.len()
        );
        Ok(())
    }

    async fn ensure_name_free(
        &self,
        program_id: Id,
        name: &str,
        except: Option<Id>,
    ) -> AdmissionResult<()> {
        let existing = self.store.list_courses_for_program(program_id).await?;
        if existing
            .iter()
            .any(|c| Some(c.course_id) != except && c.has_name(name))
        {
            return Err(already_exists(
                DuplicateCourseName {
                    program_id,
                    course_name: name.to_string(),
                }
                .into(),
            ));
        }
        Ok(())
    }

    async fn get(&self, id: Id) -> AdmissionResult<Course> {
        require(self.store.get_course(id).await?, EntityKind::Course, id)
    }

    async fn get_by_name(&self, name: &str) -> AdmissionResult<Course> {
        self.store
            .find_course_by_name(name)
            .await?
            .ok_or_else(|| {
                AdmissionError::NotFound(format!("No Course found with Course Name {}", name))
            })
    }
}

/// A store write that lost a race on the course name index surfaces as the
/// same conflict the up-front check reports.
fn already_exists(err: anyhow::Error) -> AdmissionError {
    match err.downcast::<DuplicateCourseName>() {
        Ok(duplicate) => AdmissionError::AlreadyExists(duplicate.to_string()),
        Err(err) => AdmissionError::Store(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::application_ops::ApplicationOperations;
    use crate::logic::test_support::{catalog, dates, FailingStore};
    use crate::model::{NewApplication, NewBranch, ScheduleRefs};
    use crate::store::traits::{
        ApplicationStore, BranchStore, CourseStore, ScheduleStore,
    };
    use crate::store::MemoryStore;

    fn operations<S: Store>(store: &Arc<S>) -> CourseOperations<S> {
        let applications = ApplicationOperations::new(Arc::clone(store));
        let schedules = ScheduleOperations::new(Arc::clone(store), applications);
        CourseOperations::new(Arc::clone(store), schedules)
    }

    #[tokio::test]
    async fn add_course_rejects_duplicate_name_ignoring_case() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        let before = store.list_courses().await.unwrap().len();

        let err = ops
            .add_course(
                c.college.college_reg_id,
                c.program.program_id,
                NewCourse::new(c.course.course_name.to_uppercase(), "Any"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AdmissionError::AlreadyExists(_)));
        assert_eq!(store.list_courses().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn update_course_rejects_name_taken_in_same_program() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        let m_tech = ops
            .add_course(
                c.college.college_reg_id,
                c.program.program_id,
                NewCourse::new("M.Tech", "B.Tech"),
            )
            .await
            .unwrap();

        let err = ops
            .update_course(m_tech.course_id, NewCourse::new("b.tech", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdmissionError::AlreadyExists(_)));
        let stored = store.get_course(m_tech.course_id).await.unwrap().unwrap();
        assert_eq!(stored.course_name, "M.Tech");
        assert_eq!(stored.eligibility, "B.Tech");
    }

    #[tokio::test]
    async fn update_course_may_recase_its_own_name() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);

        ops.update_course(c.course.course_id, NewCourse::new("B.TECH", "12th"))
            .await
            .unwrap();

        let stored = store.get_course(c.course.course_id).await.unwrap().unwrap();
        assert_eq!(stored.course_name, "B.TECH");
    }

    #[test]
    fn store_name_conflict_maps_to_already_exists() {
        let err = already_exists(
            DuplicateCourseName {
                program_id: 7,
                course_name: "B.Tech".to_string(),
            }
            .into(),
        );
        assert!(matches!(err, AdmissionError::AlreadyExists(_)));

        let err = already_exists(anyhow::anyhow!("connection reset"));
        assert!(matches!(err, AdmissionError::Store(_)));
    }

    #[tokio::test]
    async fn add_course_persists_a_new_name() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);

        let response = ops
            .add_course(
                c.college.college_reg_id,
                c.program.program_id,
                NewCourse::new("M.Tech", "B.Tech"),
            )
            .await
            .unwrap();

        assert_eq!(response.course_name, "M.Tech");
        assert_eq!(response.eligibility, "B.Tech");
        let stored = store.get_course(response.course_id).await.unwrap().unwrap();
        assert_eq!(stored.program_id, c.program.program_id);
        assert_eq!(stored.college_reg_id, c.college.college_reg_id);
    }

    #[tokio::test]
    async fn same_name_is_allowed_in_another_program() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let other = crate::logic::test_support::program(&store, "Science").await;
        let ops = operations(&store);

        let response = ops
            .add_course(
                c.college.college_reg_id,
                other.program_id,
                NewCourse::new(c.course.course_name.clone(), "12th"),
            )
            .await
            .unwrap();

        assert_eq!(response.course_name, c.course.course_name);
    }

    #[tokio::test]
    async fn add_course_requires_college_and_program() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);

        let err = ops
            .add_course(404, c.program.program_id, NewCourse::new("X", "Y"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No college found with Id 404");

        let err = ops
            .add_course(c.college.college_reg_id, 405, NewCourse::new("X", "Y"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No program found with Id 405");
    }

    #[tokio::test]
    async fn lookups_and_update() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);

        assert_eq!(
            ops.find_by_name(&c.course.course_name).await.unwrap().course_id,
            c.course.course_id
        );
        assert!(ops.find_by_name("Nope").await.unwrap_err().is_not_found());
        assert_eq!(
            ops.find_by_eligibility(&c.course.eligibility).await.unwrap().len(),
            1
        );
        assert!(ops.find_by_eligibility("PhD").await.unwrap_err().is_not_found());

        let id = ops
            .update_course(c.course.course_id, NewCourse::new("B.E.", "Diploma"))
            .await
            .unwrap();
        assert_eq!(id, c.course.course_id);
        let updated = ops.find_by_id(id).await.unwrap();
        assert_eq!(updated.course_name, "B.E.");
        assert_eq!(updated.eligibility, "Diploma");
        assert!(ops.update_course(999, NewCourse::new("a", "b")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn view_all_on_empty_store_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let ops = operations(&store);
        assert!(ops.view_all_courses().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn branches_and_program_listing() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        store
            .insert_branch(
                c.course.course_id,
                NewBranch { branch_name: "ECE".to_string(), branch_description: None },
            )
            .await
            .unwrap();

        let branches = ops.list_branches(c.course.course_id).await.unwrap();
        assert_eq!(branches.len(), 2);
        assert!(ops.list_branches(12_345).await.unwrap_err().is_not_found());

        let courses = ops.list_by_program(c.program.program_id).await.unwrap();
        assert_eq!(courses.len(), 1);
        let empty = crate::logic::test_support::program(&store, "Arts").await;
        assert!(ops.list_by_program(empty.program_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_by_id_cascades_to_schedules_and_applications() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        let refs = ScheduleRefs {
            university_id: c.university.university_id,
            college_reg_id: c.college.college_reg_id,
            program_id: c.program.program_id,
            course_id: c.course.course_id,
            branch_id: c.branch.branch_id,
        };
        let first = store.insert_schedule(refs, dates(2024, 7, 1)).await.unwrap();
        let second = store.insert_schedule(refs, dates(2025, 7, 1)).await.unwrap();
        store
            .insert_application(first.scheduled_id, NewApplication::new("Asha", "asha@example.com"))
            .await
            .unwrap();

        ops.delete_by_id(c.course.course_id).await.unwrap();

        assert!(store.get_course(c.course.course_id).await.unwrap().is_none());
        assert!(store.get_schedule(first.scheduled_id).await.unwrap().is_none());
        assert!(store.get_schedule(second.scheduled_id).await.unwrap().is_none());
        assert!(store
            .list_applications_for_schedule(first.scheduled_id)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .list_schedules(Some(ScheduleFilter::CourseId(c.course.course_id)))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_by_name_cascades_like_delete_by_id() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        let refs = ScheduleRefs {
            university_id: c.university.university_id,
            college_reg_id: c.college.college_reg_id,
            program_id: c.program.program_id,
            course_id: c.course.course_id,
            branch_id: c.branch.branch_id,
        };
        let schedule = store.insert_schedule(refs, dates(2024, 7, 1)).await.unwrap();

        ops.delete_by_name(&c.course.course_name).await.unwrap();

        assert!(store.get_course(c.course.course_id).await.unwrap().is_none());
        assert!(store.get_schedule(schedule.scheduled_id).await.unwrap().is_none());
        assert!(ops.delete_by_name(&c.course.course_name).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_by_name_rolls_back_when_a_cascade_step_fails() {
        let inner = Arc::new(MemoryStore::new());
        let c = catalog(&inner).await;
        let refs = ScheduleRefs {
            university_id: c.university.university_id,
            college_reg_id: c.college.college_reg_id,
            program_id: c.program.program_id,
            course_id: c.course.course_id,
            branch_id: c.branch.branch_id,
        };
        let first = inner.insert_schedule(refs, dates(2024, 7, 1)).await.unwrap();
        let second = inner.insert_schedule(refs, dates(2025, 7, 1)).await.unwrap();
        let doomed = inner
            .insert_application(second.scheduled_id, NewApplication::new("Ravi", "ravi@example.com"))
            .await
            .unwrap();

        let store = Arc::new(FailingStore::new(Arc::clone(&inner), doomed.application_id));
        let ops = operations(&store);

        let err = ops.delete_by_name(&c.course.course_name).await.unwrap_err();

        assert!(matches!(err, AdmissionError::Store(_)));
        assert!(inner.get_course(c.course.course_id).await.unwrap().is_some());
        assert!(inner.get_schedule(first.scheduled_id).await.unwrap().is_some());
        assert!(inner.get_schedule(second.scheduled_id).await.unwrap().is_some());
        assert!(inner
            .get_application(doomed.application_id)
            .await
            .unwrap()
            .is_some());
        assert!(inner.get_branch(c.branch.branch_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_schedules_that_use_its_branches_under_another_course() {
        let store = Arc::new(MemoryStore::new());
        let c = catalog(&store).await;
        let ops = operations(&store);
        let other = store
            .insert_course(
                c.program.program_id,
                c.college.college_reg_id,
                NewCourse::new("B.Sc", "12th"),
            )
            .await
            .unwrap();
        let borrowed = store
            .insert_schedule(
                ScheduleRefs {
                    university_id: c.university.university_id,
                    college_reg_id: c.college.college_reg_id,
                    program_id: c.program.program_id,
                    course_id: other.course_id,
                    branch_id: c.branch.branch_id,
                },
                dates(2024, 7, 1),
            )
            .await
            .unwrap();

        ops.delete_by_id(c.course.course_id).await.unwrap();

        assert!(store.get_schedule(borrowed.scheduled_id).await.unwrap().is_none());
        assert!(store.get_branch(c.branch.branch_id).await.unwrap().is_none());
        assert!(store.get_course(other.course_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_of_unknown_course_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let ops = operations(&store);
        assert!(ops.delete_by_id(31).await.unwrap_err().is_not_found());
    }
}
