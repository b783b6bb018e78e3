use crate::model::Id;
use serde::{Deserialize, Serialize};

/// A course is owned twice: by the program it is taught under and by the
/// college that runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: Id,
    pub course_name: String,
    pub eligibility: String,
    pub program_id: Id,
    pub college_reg_id: Id,
}

/// Body of `POST /course/...` and `PUT /course/update/...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub course_name: String,
    pub eligibility: String,
}

impl NewCourse {
    pub fn new(course_name: impl Into<String>, eligibility: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            eligibility: eligibility.into(),
        }
    }
}

impl Course {
    /// Case-insensitive name comparison used for the per-program uniqueness rule.
    pub fn has_name(&self, name: &str) -> bool {
        self.course_name.to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case() {
        let course = Course {
            course_id: 1,
            course_name: "B.Tech".to_string(),
            eligibility: "12th".to_string(),
            program_id: 1,
            college_reg_id: 1,
        };
        assert!(course.has_name("b.tech"));
        assert!(course.has_name("B.TECH"));
        assert!(!course.has_name("B.Tech Hons"));
    }
}
