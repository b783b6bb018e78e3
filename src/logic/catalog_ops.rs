use std::sync::Arc;

use crate::logic::error::{non_empty, require, AdmissionResult};
use crate::model::{
    Branch, College, EntityKind, Id, NewBranch, NewCollege, NewProgram, NewUniversity, Program,
    University,
};
use crate::store::traits::Store;

/// Universities, colleges, programs and branches: the rows a schedule points at.
pub struct CatalogOperations<S> {
    store: Arc<S>,
}

impl<S> Clone for CatalogOperations<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> CatalogOperations<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn add_university(&self, university: NewUniversity) -> AdmissionResult<University> {
        let university = self.store.insert_university(university).await?;
        log::info!(
            "University {} '{}' added",
            university.university_id,
            university.name
        );
        Ok(university)
    }

    pub async fn find_university(&self, id: Id) -> AdmissionResult<University> {
        require(
            self.store.get_university(id).await?,
            EntityKind::University,
            id,
        )
    }

    /// A college may name the university it is affiliated with; that
    /// university must exist.
    pub async fn add_college(&self, college: NewCollege) -> AdmissionResult<College> {
        if let Some(university_id) = college.university_id {
            self.find_university(university_id).await?;
        }
        let college = self.store.insert_college(college).await?;
        log::info!(
            "College {} '{}' added",
            college.college_reg_id,
            college.college_name
        );
        Ok(college)
    }

    pub async fn find_college(&self, id: Id) -> AdmissionResult<College> {
        require(self.store.get_college(id).await?, EntityKind::College, id)
    }

    pub async fn add_program(&self, program: NewProgram) -> AdmissionResult<Program> {
        let program = self.store.insert_program(program).await?;
        log::info!(
            "Program {} '{}' added",
            program.program_id,
            program.program_name
        );
        Ok(program)
    }

    pub async fn find_program(&self, id: Id) -> AdmissionResult<Program> {
        require(self.store.get_program(id).await?, EntityKind::Program, id)
    }

    pub async fn view_all_programs(&self) -> AdmissionResult<Vec<Program>> {
        let programs = self.store.list_programs().await?;
        non_empty(programs, || "No Programs found".to_string())
    }

    pub async fn add_branch(&self, course_id: Id, branch: NewBranch) -> AdmissionResult<Branch> {
        let course = require(
            self.store.get_course(course_id).await?,
            EntityKind::Course,
            course_id,
        )?;
        let branch = self.store.insert_branch(course.course_id, branch).await?;
        log::info!(
            "Branch {} '{}' added to course {}",
            branch.branch_id,
            branch.branch_name,
            course_id
        );
        Ok(branch)
    }
}
