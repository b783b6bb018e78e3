use crate::model::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Confirmed => "CONFIRMED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(ApplicationStatus::Pending),
            "CONFIRMED" => Some(ApplicationStatus::Confirmed),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: Id,
    pub applicant_full_name: String,
    pub email_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub highest_qualification: Option<String>,
    pub final_year_percentage: Option<f64>,
    pub goals: Option<String>,
    pub application_status: ApplicationStatus,
    pub scheduled_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub applicant_full_name: String,
    pub email_id: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub highest_qualification: Option<String>,
    #[serde(default)]
    pub final_year_percentage: Option<f64>,
    #[serde(default)]
    pub goals: Option<String>,
}

impl NewApplication {
    pub fn new(applicant_full_name: impl Into<String>, email_id: impl Into<String>) -> Self {
        Self {
            applicant_full_name: applicant_full_name.into(),
            email_id: email_id.into(),
            date_of_birth: None,
            highest_qualification: None,
            final_year_percentage: None,
            goals: None,
        }
    }
}
