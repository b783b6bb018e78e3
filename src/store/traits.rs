use crate::model::{
    Application, Branch, College, Course, EntityKind, Id, NewApplication, NewBranch, NewCollege,
    NewCourse, NewProgram, NewUniversity, Program, ProgramScheduled, ScheduleDates,
    ScheduleFilter, ScheduleRefs, University,
};
use anyhow::Result;

#[async_trait::async_trait]
pub trait UniversityStore: Send + Sync {
    async fn get_university(&self, id: Id) -> Result<Option<University>>;
    async fn insert_university(&self, university: NewUniversity) -> Result<University>;
}

#[async_trait::async_trait]
pub trait CollegeStore: Send + Sync {
    async fn get_college(&self, id: Id) -> Result<Option<College>>;
    async fn insert_college(&self, college: NewCollege) -> Result<College>;
}

#[async_trait::async_trait]
pub trait ProgramStore: Send + Sync {
    async fn get_program(&self, id: Id) -> Result<Option<Program>>;
    async fn list_programs(&self) -> Result<Vec<Program>>;
    async fn insert_program(&self, program: NewProgram) -> Result<Program>;
}

#[async_trait::async_trait]
pub trait CourseStore: Send + Sync {
    async fn get_course(&self, id: Id) -> Result<Option<Course>>;
    /// Exact-name lookup; the lowest id wins when several programs share a name
    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn list_courses_by_eligibility(&self, eligibility: &str) -> Result<Vec<Course>>;
    /// Courses attached to a program
    async fn list_courses_for_program(&self, program_id: Id) -> Result<Vec<Course>>;
    /// Fails with `DuplicateCourseName` when the program already has the name.
    async fn insert_course(
        &self,
        program_id: Id,
        college_reg_id: Id,
        course: NewCourse,
    ) -> Result<Course>;
    /// Persist name and eligibility of an existing course. Fails with
    /// `DuplicateCourseName` when another course in the program has the name.
    async fn update_course(&self, course: &Course) -> Result<()>;
}

#[async_trait::async_trait]
pub trait BranchStore: Send + Sync {
    async fn get_branch(&self, id: Id) -> Result<Option<Branch>>;
    async fn list_branches_for_course(&self, course_id: Id) -> Result<Vec<Branch>>;
    async fn insert_branch(&self, course_id: Id, branch: NewBranch) -> Result<Branch>;
}

#[async_trait::async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_schedule(&self, id: Id) -> Result<Option<ProgramScheduled>>;
    /// List schedules ordered by id, optionally restricted by a filter
    async fn list_schedules(&self, filter: Option<ScheduleFilter>) -> Result<Vec<ProgramScheduled>>;
    async fn insert_schedule(
        &self,
        refs: ScheduleRefs,
        dates: ScheduleDates,
    ) -> Result<ProgramScheduled>;
    /// Persist start and end date of an existing schedule
    async fn update_schedule_dates(&self, id: Id, dates: ScheduleDates) -> Result<()>;
}

#[async_trait::async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn get_application(&self, id: Id) -> Result<Option<Application>>;
    async fn list_applications_for_schedule(&self, scheduled_id: Id) -> Result<Vec<Application>>;
    async fn insert_application(
        &self,
        scheduled_id: Id,
        application: NewApplication,
    ) -> Result<Application>;
}

/// A course write would give a program two courses whose names differ only by
/// case. Stores return it inside their `anyhow::Error` so callers can downcast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Course {course_name} already exists in program {program_id}")]
pub struct DuplicateCourseName {
    pub program_id: Id,
    pub course_name: String,
}

/// One row removal inside a cascading delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deletion {
    Application(Id),
    Schedule(Id),
    Branch(Id),
    Course(Id),
}

impl Deletion {
    pub fn kind(&self) -> EntityKind {
        match self {
            Deletion::Application(_) => EntityKind::Application,
            Deletion::Schedule(_) => EntityKind::ProgramScheduled,
            Deletion::Branch(_) => EntityKind::Branch,
            Deletion::Course(_) => EntityKind::Course,
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Deletion::Application(id)
            | Deletion::Schedule(id)
            | Deletion::Branch(id)
            | Deletion::Course(id) => *id,
        }
    }
}

#[async_trait::async_trait]
pub trait DeletionStore: Send + Sync {
    /// Apply every deletion in order as one unit of work. Either all rows are
    /// removed or none are; a step whose row no longer exists fails the unit.
    async fn apply_deletions(&self, deletions: &[Deletion]) -> Result<()>;
}

pub trait Store:
    UniversityStore
    + CollegeStore
    + ProgramStore
    + CourseStore
    + BranchStore
    + ScheduleStore
    + ApplicationStore
    + DeletionStore
    + Send
    + Sync
{
}
