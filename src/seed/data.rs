use crate::logic::AdmissionServices;
use crate::model::{
    NewApplication, NewBranch, NewCollege, NewCourse, NewProgram, NewUniversity, ScheduleDates,
};
use crate::store::traits::Store;
use anyhow::{Context, Result};
use chrono::NaiveDate;

struct SeedCourse {
    name: &'static str,
    eligibility: &'static str,
    branches: &'static [&'static str],
}

const ENGINEERING_COURSES: &[SeedCourse] = &[
    SeedCourse {
        name: "B.Tech",
        eligibility: "12th Science",
        branches: &["Computer Engineering", "Mechanical Engineering"],
    },
    SeedCourse {
        name: "M.Tech",
        eligibility: "B.Tech",
        branches: &["Data Science"],
    },
];

const MANAGEMENT_COURSES: &[SeedCourse] = &[SeedCourse {
    name: "MBA",
    eligibility: "Graduate",
    branches: &["Finance", "Marketing"],
}];

fn new_program(
    name: &str,
    description: &str,
    eligibility: &str,
    duration: &str,
    degree: &str,
) -> NewProgram {
    NewProgram {
        program_name: name.to_string(),
        program_description: Some(description.to_string()),
        eligibility: Some(eligibility.to_string()),
        duration: Some(duration.to_string()),
        degree_offered: Some(degree.to_string()),
    }
}

fn admission_window(year: i32) -> Result<ScheduleDates> {
    let start_date = NaiveDate::from_ymd_opt(year, 6, 1).context("invalid seed start date")?;
    let end_date = NaiveDate::from_ymd_opt(year, 8, 31).context("invalid seed end date")?;
    Ok(ScheduleDates {
        start_date,
        end_date,
    })
}

/// Load a small demonstration catalog: one university, two colleges, two
/// programs with courses and branches, a schedule per branch and one
/// pending application. Skipped when programs already exist.
pub async fn load_seed_data<S: Store>(services: &AdmissionServices<S>) -> Result<()> {
    match services.catalog.view_all_programs().await {
        Ok(programs) => {
            log::info!(
                "Store already holds {} programs, skipping seed data",
                programs.len()
            );
            return Ok(());
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let university = services
        .catalog
        .add_university(NewUniversity {
            name: "Savitribai Phule Pune University".to_string(),
        })
        .await?;

    let engineering_college = services
        .catalog
        .add_college(NewCollege {
            college_name: "College of Engineering Pune".to_string(),
            college_address: Some("Shivajinagar, Pune".to_string()),
            university_id: Some(university.university_id),
        })
        .await?;
    let management_college = services
        .catalog
        .add_college(NewCollege {
            college_name: "Institute of Management Studies".to_string(),
            college_address: Some("Kothrud, Pune".to_string()),
            university_id: Some(university.university_id),
        })
        .await?;

    let engineering = services
        .catalog
        .add_program(new_program(
            "Engineering",
            "Undergraduate and postgraduate engineering",
            "12th Science",
            "4 Years",
            "Bachelor of Technology",
        ))
        .await?;
    let management = services
        .catalog
        .add_program(new_program(
            "Management",
            "Business administration",
            "Graduate",
            "2 Years",
            "Master of Business Administration",
        ))
        .await?;

    let dates = admission_window(2025)?;
    let mut first_schedule = None;
    let offerings = [
        (&engineering_college, &engineering, ENGINEERING_COURSES),
        (&management_college, &management, MANAGEMENT_COURSES),
    ];

    for (college, program, courses) in offerings {
        for seed in courses {
            let course = services
                .courses
                .add_course(
                    college.college_reg_id,
                    program.program_id,
                    NewCourse::new(seed.name, seed.eligibility),
                )
                .await?;

            for branch_name in seed.branches {
                let branch = services
                    .catalog
                    .add_branch(
                        course.course_id,
                        NewBranch {
                            branch_name: branch_name.to_string(),
                            branch_description: None,
                        },
                    )
                    .await?;

                let schedule = services
                    .schedules
                    .add_schedule(
                        university.university_id,
                        college.college_reg_id,
                        program.program_id,
                        course.course_id,
                        branch.branch_id,
                        dates,
                    )
                    .await?;
                first_schedule.get_or_insert(schedule.scheduled_id);
            }
        }
    }

    if let Some(scheduled_id) = first_schedule {
        let mut application = NewApplication::new("Asha Kulkarni", "asha.kulkarni@example.com");
        application.highest_qualification = Some("12th Science".to_string());
        application.final_year_percentage = Some(88.4);
        application.goals = Some("Systems programming".to_string());
        services
            .applications
            .add_application(scheduled_id, application)
            .await?;
    }

    log::info!("Seed data loaded");
    Ok(())
}
