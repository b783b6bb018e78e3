use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub university_id: Id,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUniversity {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub college_reg_id: Id,
    pub college_name: String,
    pub college_address: Option<String>,
    pub university_id: Option<Id>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollege {
    pub college_name: String,
    #[serde(default)]
    pub college_address: Option<String>,
    #[serde(default)]
    pub university_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub program_id: Id,
    pub program_name: String,
    pub program_description: Option<String>,
    pub eligibility: Option<String>,
    pub duration: Option<String>,
    pub degree_offered: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    pub program_name: String,
    #[serde(default)]
    pub program_description: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub degree_offered: Option<String>,
}

/// Specialisation offered under a course (e.g. "Computer Science" under B.Tech).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub branch_id: Id,
    pub branch_name: String,
    pub branch_description: Option<String>,
    pub course_id: Id,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBranch {
    pub branch_name: String,
    #[serde(default)]
    pub branch_description: Option<String>,
}
