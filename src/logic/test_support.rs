//! Fixtures shared by the operation tests.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::model::{
    Application, Branch, College, Course, Id, NewApplication, NewBranch, NewCollege, NewCourse,
    NewProgram, NewUniversity, Program, ProgramScheduled, ScheduleDates, ScheduleFilter,
    ScheduleRefs, University,
};
use crate::store::traits::{
    ApplicationStore, BranchStore, CollegeStore, CourseStore, Deletion, DeletionStore,
    ProgramStore, ScheduleStore, Store, UniversityStore,
};
use crate::store::MemoryStore;

/// One row of every catalog table, wired together.
pub struct TestCatalog {
    pub university: University,
    pub college: College,
    pub program: Program,
    pub course: Course,
    pub branch: Branch,
}

pub async fn catalog(store: &Arc<MemoryStore>) -> TestCatalog {
    let university = store
        .insert_university(NewUniversity {
            name: "Savitribai Phule Pune University".to_string(),
        })
        .await
        .unwrap();
    let college = store
        .insert_college(NewCollege {
            college_name: "College of Engineering".to_string(),
            college_address: Some("Shivajinagar, Pune".to_string()),
            university_id: Some(university.university_id),
        })
        .await
        .unwrap();
    let program = program(store, "Engineering").await;
    let course = store
        .insert_course(
            program.program_id,
            college.college_reg_id,
            NewCourse::new("B.Tech", "12th Science"),
        )
        .await
        .unwrap();
    let branch = store
        .insert_branch(
            course.course_id,
            NewBranch {
                branch_name: "Computer Engineering".to_string(),
                branch_description: Some("Software and systems".to_string()),
            },
        )
        .await
        .unwrap();

    TestCatalog {
        university,
        college,
        program,
        course,
        branch,
    }
}

pub async fn program(store: &Arc<MemoryStore>, name: &str) -> Program {
    store
        .insert_program(NewProgram {
            program_name: name.to_string(),
            program_description: None,
            eligibility: Some("12th".to_string()),
            duration: Some("4 Years".to_string()),
            degree_offered: Some("Bachelor".to_string()),
        })
        .await
        .unwrap()
}

/// A one-year window opening on the given day.
pub fn dates(year: i32, month: u32, day: u32) -> ScheduleDates {
    let start_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    let end_date = NaiveDate::from_ymd_opt(year + 1, month, day).unwrap();
    ScheduleDates {
        start_date,
        end_date,
    }
}

/// Delegates to a memory store but fails reads of one application, so a
/// cascade that reaches it aborts halfway through planning.
pub struct FailingStore {
    inner: Arc<MemoryStore>,
    broken_application: Id,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>, broken_application: Id) -> Self {
        Self {
            inner,
            broken_application,
        }
    }
}

#[async_trait::async_trait]
impl UniversityStore for FailingStore {
    async fn get_university(&self, id: Id) -> Result<Option<University>> {
        self.inner.get_university(id).await
    }

    async fn insert_university(&self, university: NewUniversity) -> Result<University> {
        self.inner.insert_university(university).await
    }
}

#[async_trait::async_trait]
impl CollegeStore for FailingStore {
    async fn get_college(&self, id: Id) -> Result<Option<College>> {
        self.inner.get_college(id).await
    }

    async fn insert_college(&self, college: NewCollege) -> Result<College> {
        self.inner.insert_college(college).await
    }
}

#[async_trait::async_trait]
impl ProgramStore for FailingStore {
    async fn get_program(&self, id: Id) -> Result<Option<Program>> {
        self.inner.get_program(id).await
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        self.inner.list_programs().await
    }

    async fn insert_program(&self, program: NewProgram) -> Result<Program> {
        self.inner.insert_program(program).await
    }
}

#[async_trait::async_trait]
impl CourseStore for FailingStore {
    async fn get_course(&self, id: Id) -> Result<Option<Course>> {
        self.inner.get_course(id).await
    }

    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        self.inner.find_course_by_name(name).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.inner.list_courses().await
    }

    async fn list_courses_by_eligibility(&self, eligibility: &str) -> Result<Vec<Course>> {
        self.inner.list_courses_by_eligibility(eligibility).await
    }

    async fn list_courses_for_program(&self, program_id: Id) -> Result<Vec<Course>> {
        self.inner.list_courses_for_program(program_id).await
    }

    async fn insert_course(
        &self,
        program_id: Id,
        college_reg_id: Id,
        course: NewCourse,
    ) -> Result<Course> {
        self.inner
            .insert_course(program_id, college_reg_id, course)
            .await
    }

    async fn update_course(&self, course: &Course) -> Result<()> {
        self.inner.update_course(course).await
    }
}

#[async_trait::async_trait]
impl BranchStore for FailingStore {
    async fn get_branch(&self, id: Id) -> Result<Option<Branch>> {
        self.inner.get_branch(id).await
    }

    async fn list_branches_for_course(&self, course_id: Id) -> Result<Vec<Branch>> {
        self.inner.list_branches_for_course(course_id).await
    }

    async fn insert_branch(&self, course_id: Id, branch: NewBranch) -> Result<Branch> {
        self.inner.insert_branch(course_id, branch).await
    }
}

#[async_trait::async_trait]
impl ScheduleStore for FailingStore {
    async fn get_schedule(&self, id: Id) -> Result<Option<ProgramScheduled>> {
        self.inner.get_schedule(id).await
    }

    async fn list_schedules(&self, filter: Option<ScheduleFilter>) -> Result<Vec<ProgramScheduled>> {
        self.inner.list_schedules(filter).await
    }

    async fn insert_schedule(
        &self,
        refs: ScheduleRefs,
        dates: ScheduleDates,
    ) -> Result<ProgramScheduled> {
        self.inner.insert_schedule(refs, dates).await
    }

    async fn update_schedule_dates(&self, id: Id, dates: ScheduleDates) -> Result<()> {
        self.inner.update_schedule_dates(id, dates).await
    }
}

#[async_trait::async_trait]
impl ApplicationStore for FailingStore {
    async fn get_application(&self, id: Id) -> Result<Option<Application>> {
        if id == self.broken_application {
            bail!("connection reset while reading application {}", id);
        }
        self.inner.get_application(id).await
    }

    async fn list_applications_for_schedule(&self, scheduled_id: Id) -> Result<Vec<Application>> {
        self.inner.list_applications_for_schedule(scheduled_id).await
    }

    async fn insert_application(
        &self,
        scheduled_id: Id,
        application: NewApplication,
    ) -> Result<Application> {
        self.inner.insert_application(scheduled_id, application).await
    }
}

#[async_trait::async_trait]
impl DeletionStore for FailingStore {
    async fn apply_deletions(&self, deletions: &[Deletion]) -> Result<()> {
        self.inner.apply_deletions(deletions).await
    }
}

impl Store for FailingStore {}
