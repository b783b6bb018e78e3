use anyhow::{bail, Result};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::model::{
    Application, ApplicationStatus, Branch, College, Course, Id, NewApplication, NewBranch,
    NewCollege, NewCourse, NewProgram, NewUniversity, Program, ProgramScheduled, ScheduleDates,
    ScheduleFilter, ScheduleRefs, University,
};
use crate::store::traits::{
    ApplicationStore, BranchStore, CollegeStore, CourseStore, Deletion, DeletionStore,
    DuplicateCourseName, ProgramStore, ScheduleStore, Store, UniversityStore,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    universities: BTreeMap<Id, University>,
    colleges: BTreeMap<Id, College>,
    programs: BTreeMap<Id, Program>,
    courses: BTreeMap<Id, Course>,
    branches: BTreeMap<Id, Branch>,
    schedules: BTreeMap<Id, ProgramScheduled>,
    applications: BTreeMap<Id, Application>,
    last_id: Id,
}

impl Tables {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }

    /// Mirror of the `(program_id, LOWER(course_name))` unique index.
    fn check_course_name(&self, program_id: Id, name: &str, except: Option<Id>) -> Result<()> {
        let taken = self.courses.values().any(|c| {
            c.program_id == program_id && Some(c.course_id) != except && c.has_name(name)
        });
        if taken {
            return Err(DuplicateCourseName {
                program_id,
                course_name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Remove one row, refusing when another row still points at it, the same
    /// way the PostgreSQL foreign keys do.
    fn delete(&mut self, deletion: Deletion) -> Result<()> {
        match deletion {
            Deletion::Application(id) => {
                if self.applications.remove(&id).is_none() {
                    bail!("application {} does not exist", id);
                }
            }
            Deletion::Schedule(id) => {
                if self.applications.values().any(|a| a.scheduled_id == id) {
                    bail!("program scheduled {} is still referenced by applications", id);
                }
                if self.schedules.remove(&id).is_none() {
                    bail!("program scheduled {} does not exist", id);
                }
            }
            Deletion::Branch(id) => {
                if self.schedules.values().any(|s| s.branch_id == id) {
                    bail!("branch {} is still referenced by program schedules", id);
                }
                if self.branches.remove(&id).is_none() {
                    bail!("branch {} does not exist", id);
                }
            }
            Deletion::Course(id) => {
                if self.schedules.values().any(|s| s.course_id == id) {
                    bail!("course {} is still referenced by program schedules", id);
                }
                if self.branches.values().any(|b| b.course_id == id) {
                    bail!("course {} still owns branches", id);
                }
                if self.courses.remove(&id).is_none() {
                    bail!("course {} does not exist", id);
                }
            }
        }
        Ok(())
    }
}

/// Store kept entirely in process memory. Used for local development and
/// tests; contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UniversityStore for MemoryStore {
    async fn get_university(&self, id: Id) -> Result<Option<University>> {
        Ok(self.tables.read().universities.get(&id).cloned())
    }

    async fn insert_university(&self, university: NewUniversity) -> Result<University> {
        let mut tables = self.tables.write();
        let university = University {
            university_id: tables.next_id(),
            name: university.name,
        };
        tables
            .universities
            .insert(university.university_id, university.clone());
        Ok(university)
    }
}

#[async_trait::async_trait]
impl CollegeStore for MemoryStore {
    async fn get_college(&self, id: Id) -> Result<Option<College>> {
        Ok(self.tables.read().colleges.get(&id).cloned())
    }

    async fn insert_college(&self, college: NewCollege) -> Result<College> {
        let mut tables = self.tables.write();
        if let Some(university_id) = college.university_id {
            if !tables.universities.contains_key(&university_id) {
                bail!("university {} does not exist", university_id);
            }
        }
        let college = College {
            college_reg_id: tables.next_id(),
            college_name: college.college_name,
            college_address: college.college_address,
            university_id: college.university_id,
        };
        tables.colleges.insert(college.college_reg_id, college.clone());
        Ok(college)
    }
}

#[async_trait::async_trait]
impl ProgramStore for MemoryStore {
    async fn get_program(&self, id: Id) -> Result<Option<Program>> {
        Ok(self.tables.read().programs.get(&id).cloned())
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        Ok(self.tables.read().programs.values().cloned().collect_vec())
    }

    async fn insert_program(&self, program: NewProgram) -> Result<Program> {
        let mut tables = self.tables.write();
        let program = Program {
            program_id: tables.next_id(),
            program_name: program.program_name,
            program_description: program.program_description,
            eligibility: program.eligibility,
            duration: program.duration,
            degree_offered: program.degree_offered,
        };
        tables.programs.insert(program.program_id, program.clone());
        Ok(program)
    }
}

#[async_trait::async_trait]
impl CourseStore for MemoryStore {
    async fn get_course(&self, id: Id) -> Result<Option<Course>> {
        Ok(self.tables.read().courses.get(&id).cloned())
    }

    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        Ok(self
            .tables
            .read()
            .courses
            .values()
            .find(|c| c.course_name == name)
            .cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.tables.read().courses.values().cloned().collect_vec())
    }

    async fn list_courses_by_eligibility(&self, eligibility: &str) -> Result<Vec<Course>> {
        Ok(self
            .tables
            .read()
            .courses
            .values()
            .filter(|c| c.eligibility == eligibility)
            .cloned()
            .collect_vec())
    }

    async fn list_courses_for_program(&self, program_id: Id) -> Result<Vec<Course>> {
        Ok(self
            .tables
            .read()
            .courses
            .values()
            .filter(|c| c.program_id == program_id)
            .cloned()
            .collect_vec())
    }

    async fn insert_course(
        &self,
        program_id: Id,
        college_reg_id: Id,
        course: NewCourse,
    ) -> Result<Course> {
        let mut tables = self.tables.write();
        if !tables.programs.contains_key(&program_id) {
            bail!("program {} does not exist", program_id);
        }
        if !tables.colleges.contains_key(&college_reg_id) {
            bail!("college {} does not exist", college_reg_id);
        }
        tables.check_course_name(program_id, &course.course_name, None)?;
        let course = Course {
            course_id: tables.next_id(),
            course_name: course.course_name,
            eligibility: course.eligibility,
            program_id,
            college_reg_id,
        };
        tables.courses.insert(course.course_id, course.clone());
        Ok(course)
    }

    async fn update_course(&self, course: &Course) -> Result<()> {
        let mut tables = self.tables.write();
        let Some(program_id) = tables.courses.get(&course.course_id).map(|c| c.program_id) else {
            bail!("course {} does not exist", course.course_id);
        };
        tables.check_course_name(program_id, &course.course_name, Some(course.course_id))?;
        let Some(existing) = tables.courses.get_mut(&course.course_id) else {
            bail!("course {} does not exist", course.course_id);
        };
        existing.course_name = course.course_name.clone();
        existing.eligibility = course.eligibility.clone();
        Ok(())
    }
}

#[async_trait::async_trait]
impl BranchStore for MemoryStore {
    async fn get_branch(&self, id: Id) -> Result<Option<Branch>> {
        Ok(self.tables.read().branches.get(&id).cloned())
    }

    async fn list_branches_for_course(&self, course_id: Id) -> Result<Vec<Branch>> {
        Ok(self
            .tables
            .read()
            .branches
            .values()
            .filter(|b| b.course_id == course_id)
            .cloned()
            .collect_vec())
    }

    async fn insert_branch(&self, course_id: Id, branch: NewBranch) -> Result<Branch> {
        let mut tables = self.tables.write();
        if !tables.courses.contains_key(&course_id) {
            bail!("course {} does not exist", course_id);
        }
        let branch = Branch {
            branch_id: tables.next_id(),
            branch_name: branch.branch_name,
            branch_description: branch.branch_description,
            course_id,
        };
        tables.branches.insert(branch.branch_id, branch.clone());
        Ok(branch)
    }
}

#[async_trait::async_trait]
impl ScheduleStore for MemoryStore {
    async fn get_schedule(&self, id: Id) -> Result<Option<ProgramScheduled>> {
        Ok(self.tables.read().schedules.get(&id).cloned())
    }

    async fn list_schedules(&self, filter: Option<ScheduleFilter>) -> Result<Vec<ProgramScheduled>> {
        let tables = self.tables.read();
        let schedules = tables
            .schedules
            .values()
            .filter(|schedule| match &filter {
                Some(filter) => {
                    let college_name = tables
                        .colleges
                        .get(&schedule.college_reg_id)
                        .map(|c| c.college_name.as_str());
                    filter.matches(schedule, college_name)
                }
                None => true,
            })
            .cloned()
            .collect_vec();
        Ok(schedules)
    }

    async fn insert_schedule(
        &self,
        refs: ScheduleRefs,
        dates: ScheduleDates,
    ) -> Result<ProgramScheduled> {
        let mut tables = self.tables.write();
        if !tables.universities.contains_key(&refs.university_id)
            || !tables.colleges.contains_key(&refs.college_reg_id)
            || !tables.programs.contains_key(&refs.program_id)
            || !tables.courses.contains_key(&refs.course_id)
            || !tables.branches.contains_key(&refs.branch_id)
        {
            bail!("program scheduled references a missing row: {:?}", refs);
        }
        let schedule = ProgramScheduled {
            scheduled_id: tables.next_id(),
            start_date: dates.start_date,
            end_date: dates.end_date,
            university_id: refs.university_id,
            college_reg_id: refs.college_reg_id,
            program_id: refs.program_id,
            course_id: refs.course_id,
            branch_id: refs.branch_id,
        };
        tables.schedules.insert(schedule.scheduled_id, schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule_dates(&self, id: Id, dates: ScheduleDates) -> Result<()> {
        let mut tables = self.tables.write();
        let Some(existing) = tables.schedules.get_mut(&id) else {
            bail!("program scheduled {} does not exist", id);
        };
        existing.start_date = dates.start_date;
        existing.end_date = dates.end_date;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ApplicationStore for MemoryStore {
    async fn get_application(&self, id: Id) -> Result<Option<Application>> {
        Ok(self.tables.read().applications.get(&id).cloned())
    }

    async fn list_applications_for_schedule(&self, scheduled_id: Id) -> Result<Vec<Application>> {
        Ok(self
            .tables
            .read()
            .applications
            .values()
            .filter(|a| a.scheduled_id == scheduled_id)
            .cloned()
            .collect_vec())
    }

    async fn insert_application(
        &self,
        scheduled_id: Id,
        application: NewApplication,
    ) -> Result<Application> {
        let mut tables = self.tables.write();
        if !tables.schedules.contains_key(&scheduled_id) {
            bail!("program scheduled {} does not exist", scheduled_id);
        }
        let application = Application {
            application_id: tables.next_id(),
            applicant_full_name: application.applicant_full_name,
            email_id: application.email_id,
            date_of_birth: application.date_of_birth,
            highest_qualification: application.highest_qualification,
            final_year_percentage: application.final_year_percentage,
            goals: application.goals,
            application_status: ApplicationStatus::Pending,
            scheduled_id,
        };
        tables
            .applications
            .insert(application.application_id, application.clone());
        Ok(application)
    }
}

#[async_trait::async_trait]
impl DeletionStore for MemoryStore {
    async fn apply_deletions(&self, deletions: &[Deletion]) -> Result<()> {
        let mut tables = self.tables.write();
        // Work on a copy so a failing step leaves the live tables untouched.
        let mut staged = tables.clone();
        for deletion in deletions {
            staged.delete(*deletion)?;
        }
        *tables = staged;
        Ok(())
    }
}

impl Store for MemoryStore {}
