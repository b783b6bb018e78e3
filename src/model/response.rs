use crate::model::{Course, Id};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub course_id: Id,
    pub course_name: String,
    pub eligibility: String,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id,
            course_name: course.course_name.clone(),
            eligibility: course.eligibility.clone(),
        }
    }
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            course_id: course.course_id,
            course_name: course.course_name,
            eligibility: course.eligibility,
        }
    }
}

/// Flattened attributes of the five entities a schedule references.
///
/// `eligibility` exists on both programs and courses; composition writes the
/// course value last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
    pub university_id: Id,
    pub name: String,
    pub college_reg_id: Id,
    pub college_name: String,
    pub college_address: Option<String>,
    pub program_id: Id,
    pub program_name: String,
    pub program_description: Option<String>,
    pub duration: Option<String>,
    pub degree_offered: Option<String>,
    pub eligibility: Option<String>,
    pub course_id: Id,
    pub course_name: String,
    pub branch_id: Id,
    pub branch_name: String,
    pub branch_description: Option<String>,
}

/// Read model for a schedule: its own fields plus the embedded details record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramScheduledResponse {
    pub scheduled_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "programScheduledResponseDto")]
    pub details: ScheduleDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_response_keeps_nested_wire_shape() {
        let response = ProgramScheduledResponse {
            scheduled_id: 4,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
            details: ScheduleDetails {
                name: "University 1".to_string(),
                branch_name: "Branch 1".to_string(),
                ..ScheduleDetails::default()
            },
        };

        let json = serde_json::to_value(&response).expect("serializes");
        assert_eq!(json["scheduledId"], 4);
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-12-31");
        assert_eq!(json["programScheduledResponseDto"]["name"], "University 1");
        assert_eq!(json["programScheduledResponseDto"]["branchName"], "Branch 1");
        assert!(json.get("details").is_none());
    }
}
