use crate::logic::error::{require, AdmissionResult};
use crate::model::{
    Branch, College, Course, EntityKind, Program, ProgramScheduled, ProgramScheduledResponse,
    ScheduleDetails, University,
};
use crate::store::traits::Store;

/// A schedule together with the five rows it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleGraph {
    pub schedule: ProgramScheduled,
    pub university: University,
    pub college: College,
    pub program: Program,
    pub course: Course,
    pub branch: Branch,
}

impl ScheduleGraph {
    /// Load every reference of a stored schedule.
    pub async fn load<S: Store>(store: &S, schedule: ProgramScheduled) -> AdmissionResult<Self> {
        let university = require(
            store.get_university(schedule.university_id).await?,
            EntityKind::University,
            schedule.university_id,
        )?;
        let college = require(
            store.get_college(schedule.college_reg_id).await?,
            EntityKind::College,
            schedule.college_reg_id,
        )?;
        let program = require(
            store.get_program(schedule.program_id).await?,
            EntityKind::Program,
            schedule.program_id,
        )?;
        let course = require(
            store.get_course(schedule.course_id).await?,
            EntityKind::Course,
            schedule.course_id,
        )?;
        let branch = require(
            store.get_branch(schedule.branch_id).await?,
            EntityKind::Branch,
            schedule.branch_id,
        )?;

        Ok(Self {
            schedule,
            university,
            college,
            program,
            course,
            branch,
        })
    }

    /// Build the flattened read model. Sources are copied in a fixed order
    /// (branch, program, course, college, university); a later source
    /// overwrites a field an earlier one also carries.
    pub fn compose(&self) -> ProgramScheduledResponse {
        let mut details = ScheduleDetails::default();
        copy_branch(&self.branch, &mut details);
        copy_program(&self.program, &mut details);
        copy_course(&self.course, &mut details);
        copy_college(&self.college, &mut details);
        copy_university(&self.university, &mut details);

        ProgramScheduledResponse {
            scheduled_id: self.schedule.scheduled_id,
            start_date: self.schedule.start_date,
            end_date: self.schedule.end_date,
            details,
        }
    }
}

fn copy_branch(branch: &Branch, details: &mut ScheduleDetails) {
    details.branch_id = branch.branch_id;
    details.branch_name = branch.branch_name.clone();
    details.branch_description = branch.branch_description.clone();
}

fn copy_program(program: &Program, details: &mut ScheduleDetails) {
    details.program_id = program.program_id;
    details.program_name = program.program_name.clone();
    details.program_description = program.program_description.clone();
    details.duration = program.duration.clone();
    details.degree_offered = program.degree_offered.clone();
    details.eligibility = program.eligibility.clone();
}

fn copy_course(course: &Course, details: &mut ScheduleDetails) {
    details.course_id = course.course_id;
    details.course_name = course.course_name.clone();
    details.eligibility = Some(course.eligibility.clone());
}

fn copy_college(college: &College, details: &mut ScheduleDetails) {
    details.college_reg_id = college.college_reg_id;
    details.college_name = college.college_name.clone();
    details.college_address = college.college_address.clone();
}

fn copy_university(university: &University, details: &mut ScheduleDetails) {
    details.university_id = university.university_id;
    details.name = university.name.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn graph() -> ScheduleGraph {
        ScheduleGraph {
            schedule: ProgramScheduled {
                scheduled_id: 40,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                university_id: 1,
                college_reg_id: 2,
                program_id: 3,
                course_id: 4,
                branch_id: 5,
            },
            university: University {
                university_id: 1,
                name: "University 1".to_string(),
            },
            college: College {
                college_reg_id: 2,
                college_name: "College 1".to_string(),
                college_address: Some("Pune".to_string()),
                university_id: Some(1),
            },
            program: Program {
                program_id: 3,
                program_name: "Program 1".to_string(),
                program_description: None,
                eligibility: Some("Graduate".to_string()),
                duration: Some("1 Year".to_string()),
                degree_offered: Some("Degree 1".to_string()),
            },
            course: Course {
                course_id: 4,
                course_name: "Course 1".to_string(),
                eligibility: "Eligibility 1".to_string(),
                program_id: 3,
                college_reg_id: 2,
            },
            branch: Branch {
                branch_id: 5,
                branch_name: "Branch 1".to_string(),
                branch_description: Some("Core".to_string()),
                course_id: 4,
            },
        }
    }

    #[test]
    fn compose_copies_every_source_and_the_schedule_fields() {
        let response = graph().compose();

        assert_eq!(response.scheduled_id, 40);
        assert_eq!(response.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(response.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let details = response.details;
        assert_eq!(details.university_id, 1);
        assert_eq!(details.name, "University 1");
        assert_eq!(details.college_reg_id, 2);
        assert_eq!(details.college_name, "College 1");
        assert_eq!(details.college_address.as_deref(), Some("Pune"));
        assert_eq!(details.program_id, 3);
        assert_eq!(details.program_name, "Program 1");
        assert_eq!(details.duration.as_deref(), Some("1 Year"));
        assert_eq!(details.degree_offered.as_deref(), Some("Degree 1"));
        assert_eq!(details.course_id, 4);
        assert_eq!(details.course_name, "Course 1");
        assert_eq!(details.branch_id, 5);
        assert_eq!(details.branch_name, "Branch 1");
        assert_eq!(details.branch_description.as_deref(), Some("Core"));
    }

    #[test]
    fn course_eligibility_overrides_program_eligibility() {
        let details = graph().compose().details;
        assert_eq!(details.eligibility.as_deref(), Some("Eligibility 1"));
    }
}
