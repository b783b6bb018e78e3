use crate::model::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated offering of a course/branch/program at a college under a university.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramScheduled {
    pub scheduled_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub university_id: Id,
    pub college_reg_id: Id,
    pub program_id: Id,
    pub course_id: Id,
    pub branch_id: Id,
}

/// The only fields a caller supplies for a schedule; also the full update set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Fully resolved references of a schedule about to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRefs {
    pub university_id: Id,
    pub college_reg_id: Id,
    pub program_id: Id,
    pub course_id: Id,
    pub branch_id: Id,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleFilter {
    CollegeName(String),
    StartDate(NaiveDate),
    CollegeRegId(Id),
    BranchId(Id),
    ProgramId(Id),
    CourseId(Id),
    UniversityId(Id),
}

impl ScheduleFilter {
    /// Human readable value used in "nothing found" messages.
    pub fn describe(&self) -> String {
        match self {
            ScheduleFilter::CollegeName(name) => name.clone(),
            ScheduleFilter::StartDate(date) => format!("start date {}", date),
            ScheduleFilter::CollegeRegId(id) => format!("college {}", id),
            ScheduleFilter::BranchId(id) => format!("branch {}", id),
            ScheduleFilter::ProgramId(id) => format!("program {}", id),
            ScheduleFilter::CourseId(id) => format!("course {}", id),
            ScheduleFilter::UniversityId(id) => format!("university {}", id),
        }
    }

    /// Match a stored row against the filter. `college_name` is the name of the
    /// row's college, which the row itself does not carry.
    pub fn matches(&self, schedule: &ProgramScheduled, college_name: Option<&str>) -> bool {
        match self {
            ScheduleFilter::CollegeName(name) => college_name == Some(name.as_str()),
            ScheduleFilter::StartDate(date) => schedule.start_date == *date,
            ScheduleFilter::CollegeRegId(id) => schedule.college_reg_id == *id,
            ScheduleFilter::BranchId(id) => schedule.branch_id == *id,
            ScheduleFilter::ProgramId(id) => schedule.program_id == *id,
            ScheduleFilter::CourseId(id) => schedule.course_id == *id,
            ScheduleFilter::UniversityId(id) => schedule.university_id == *id,
        }
    }
}
