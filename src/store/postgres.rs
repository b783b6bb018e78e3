use anyhow::{bail, Context, Result};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::model::{
    Application, ApplicationStatus, Branch, College, Course, Id, NewApplication, NewBranch,
    NewCollege, NewCourse, NewProgram, NewUniversity, Program, ProgramScheduled, ScheduleDates,
    ScheduleFilter, ScheduleRefs, University,
};
use crate::store::traits::{
    ApplicationStore, BranchStore, CollegeStore, CourseStore, Deletion, DeletionStore,
    DuplicateCourseName, ProgramStore, ScheduleStore, Store, UniversityStore,
};

const COURSE_COLUMNS: &str = "course_id, course_name, eligibility, program_id, college_reg_id";
const SCHEDULE_COLUMNS: &str = "s.scheduled_id, s.start_date, s.end_date, s.university_id, \
     s.college_reg_id, s.program_id, s.course_id, s.branch_id";
const APPLICATION_COLUMNS: &str = "application_id, applicant_full_name, email_id, date_of_birth, \
     highest_qualification, final_year_percentage, goals, application_status, scheduled_id";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    async fn schedules_where(&self, column: &str, id: Id) -> sqlx::Result<Vec<PgRow>> {
        let sql = format!(
            "SELECT {} FROM program_scheduled s WHERE s.{} = $1 ORDER BY s.scheduled_id",
            SCHEDULE_COLUMNS, column
        );
        sqlx::query(&sql).bind(id).fetch_all(&self.pool).await
    }
}

/// Map a violation of `courses_program_name_idx` to `DuplicateCourseName`;
/// anything else keeps its context.
fn course_write_error(
    err: sqlx::Error,
    program_id: Id,
    course_name: &str,
    action: &'static str,
) -> anyhow::Error {
    let duplicate = err
        .as_database_error()
        .map(|db| db.code().as_deref() == Some("23505"))
        .unwrap_or(false);
    if duplicate {
        return DuplicateCourseName {
            program_id,
            course_name: course_name.to_string(),
        }
        .into();
    }
    anyhow::Error::new(err).context(action)
}

fn course_from_row(row: &PgRow) -> Course {
    Course {
        course_id: row.get("course_id"),
        course_name: row.get("course_name"),
        eligibility: row.get("eligibility"),
        program_id: row.get("program_id"),
        college_reg_id: row.get("college_reg_id"),
    }
}

fn program_from_row(row: &PgRow) -> Program {
    Program {
        program_id: row.get("program_id"),
        program_name: row.get("program_name"),
        program_description: row.get("program_description"),
        eligibility: row.get("eligibility"),
        duration: row.get("duration"),
        degree_offered: row.get("degree_offered"),
    }
}

fn branch_from_row(row: &PgRow) -> Branch {
    Branch {
        branch_id: row.get("branch_id"),
        branch_name: row.get("branch_name"),
        branch_description: row.get("branch_description"),
        course_id: row.get("course_id"),
    }
}

fn schedule_from_row(row: &PgRow) -> ProgramScheduled {
    ProgramScheduled {
        scheduled_id: row.get("scheduled_id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        university_id: row.get("university_id"),
        college_reg_id: row.get("college_reg_id"),
        program_id: row.get("program_id"),
        course_id: row.get("course_id"),
        branch_id: row.get("branch_id"),
    }
}

fn application_from_row(row: &PgRow) -> Result<Application> {
    let status: String = row.get("application_status");
    let application_status = ApplicationStatus::parse(&status)
        .with_context(|| format!("Unknown application status '{}'", status))?;

    Ok(Application {
        application_id: row.get("application_id"),
        applicant_full_name: row.get("applicant_full_name"),
        email_id: row.get("email_id"),
        date_of_birth: row.get("date_of_birth"),
        highest_qualification: row.get("highest_qualification"),
        final_year_percentage: row.get("final_year_percentage"),
        goals: row.get("goals"),
        application_status,
        scheduled_id: row.get("scheduled_id"),
    })
}

#[async_trait::async_trait]
impl UniversityStore for PostgresStore {
    async fn get_university(&self, id: Id) -> Result<Option<University>> {
        let row = sqlx::query("SELECT university_id, name FROM universities WHERE university_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch university")?;

        Ok(row.map(|row| University {
            university_id: row.get("university_id"),
            name: row.get("name"),
        }))
    }

    async fn insert_university(&self, university: NewUniversity) -> Result<University> {
        let row = sqlx::query("INSERT INTO universities (name) VALUES ($1) RETURNING university_id")
            .bind(&university.name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to insert university")?;

        Ok(University {
            university_id: row.get("university_id"),
            name: university.name,
        })
    }
}

#[async_trait::async_trait]
impl CollegeStore for PostgresStore {
    async fn get_college(&self, id: Id) -> Result<Option<College>> {
        let row = sqlx::query(
            "SELECT college_reg_id, college_name, college_address, university_id FROM colleges WHERE college_reg_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch college")?;

        Ok(row.map(|row| College {
            college_reg_id: row.get("college_reg_id"),
            college_name: row.get("college_name"),
            college_address: row.get("college_address"),
            university_id: row.get("university_id"),
        }))
    }

    async fn insert_college(&self, college: NewCollege) -> Result<College> {
        let row = sqlx::query(
            r#"
            INSERT INTO colleges (college_name, college_address, university_id)
            VALUES ($1, $2, $3)
            RETURNING college_reg_id
            "#,
        )
        .bind(&college.college_name)
        .bind(&college.college_address)
        .bind(college.university_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert college")?;

        Ok(College {
            college_reg_id: row.get("college_reg_id"),
            college_name: college.college_name,
            college_address: college.college_address,
            university_id: college.university_id,
        })
    }
}

#[async_trait::async_trait]
impl ProgramStore for PostgresStore {
    async fn get_program(&self, id: Id) -> Result<Option<Program>> {
        let row = sqlx::query("SELECT * FROM programs WHERE program_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch program")?;

        Ok(row.as_ref().map(program_from_row))
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        let rows = sqlx::query("SELECT * FROM programs ORDER BY program_id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list programs")?;

        Ok(rows.iter().map(program_from_row).collect())
    }

    async fn insert_program(&self, program: NewProgram) -> Result<Program> {
        let row = sqlx::query(
            r#"
            INSERT INTO programs (program_name, program_description, eligibility, duration, degree_offered)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING program_id
            "#,
        )
        .bind(&program.program_name)
        .bind(&program.program_description)
        .bind(&program.eligibility)
        .bind(&program.duration)
        .bind(&program.degree_offered)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert program")?;

        Ok(Program {
            program_id: row.get("program_id"),
            program_name: program.program_name,
            program_description: program.program_description,
            eligibility: program.eligibility,
            duration: program.duration,
            degree_offered: program.degree_offered,
        })
    }
}

#[async_trait::async_trait]
impl CourseStore for PostgresStore {
    async fn get_course(&self, id: Id) -> Result<Option<Course>> {
        let sql = format!("SELECT {} FROM courses WHERE course_id = $1", COURSE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch course")?;

        Ok(row.as_ref().map(course_from_row))
    }

    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        let sql = format!(
            "SELECT {} FROM courses WHERE course_name = $1 ORDER BY course_id LIMIT 1",
            COURSE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch course by name")?;

        Ok(row.as_ref().map(course_from_row))
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let sql = format!("SELECT {} FROM courses ORDER BY course_id", COURSE_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list courses")?;

        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn list_courses_by_eligibility(&self, eligibility: &str) -> Result<Vec<Course>> {
        let sql = format!(
            "SELECT {} FROM courses WHERE eligibility = $1 ORDER BY course_id",
            COURSE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(eligibility)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list courses by eligibility")?;

        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn list_courses_for_program(&self, program_id: Id) -> Result<Vec<Course>> {
        let sql = format!(
            "SELECT {} FROM courses WHERE program_id = $1 ORDER BY course_id",
            COURSE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(program_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list courses for program")?;

        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn insert_course(
        &self,
        program_id: Id,
        college_reg_id: Id,
        course: NewCourse,
    ) -> Result<Course> {
        let row = sqlx::query(
            r#"
            INSERT INTO courses (course_name, eligibility, program_id, college_reg_id)
            VALUES ($1, $2, $3, $4)
            RETURNING course_id
            "#,
        )
        .bind(&course.course_name)
        .bind(&course.eligibility)
        .bind(program_id)
        .bind(college_reg_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            course_write_error(e, program_id, &course.course_name, "Failed to insert course")
        })?;

        Ok(Course {
            course_id: row.get("course_id"),
            course_name: course.course_name,
            eligibility: course.eligibility,
            program_id,
            college_reg_id,
        })
    }

    async fn update_course(&self, course: &Course) -> Result<()> {
        let result =
            sqlx::query("UPDATE courses SET course_name = $2, eligibility = $3 WHERE course_id = $1")
                .bind(course.course_id)
                .bind(&course.course_name)
                .bind(&course.eligibility)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    course_write_error(
                        e,
                        course.program_id,
                        &course.course_name,
                        "Failed to update course",
                    )
                })?;

        if result.rows_affected() == 0 {
            bail!("course {} does not exist", course.course_id);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BranchStore for PostgresStore {
    async fn get_branch(&self, id: Id) -> Result<Option<Branch>> {
        let row = sqlx::query("SELECT * FROM branches WHERE branch_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch branch")?;

        Ok(row.as_ref().map(branch_from_row))
    }

    async fn list_branches_for_course(&self, course_id: Id) -> Result<Vec<Branch>> {
        let rows = sqlx::query("SELECT * FROM branches WHERE course_id = $1 ORDER BY branch_id")
            .bind(course_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list branches for course")?;

        Ok(rows.iter().map(branch_from_row).collect())
    }

    async fn insert_branch(&self, course_id: Id, branch: NewBranch) -> Result<Branch> {
        let row = sqlx::query(
            r#"
            INSERT INTO branches (branch_name, branch_description, course_id)
            VALUES ($1, $2, $3)
            RETURNING branch_id
            "#,
        )
        .bind(&branch.branch_name)
        .bind(&branch.branch_description)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert branch")?;

        Ok(Branch {
            branch_id: row.get("branch_id"),
            branch_name: branch.branch_name,
            branch_description: branch.branch_description,
            course_id,
        })
    }
}

#[async_trait::async_trait]
impl ScheduleStore for PostgresStore {
    async fn get_schedule(&self, id: Id) -> Result<Option<ProgramScheduled>> {
        let sql = format!(
            "SELECT {} FROM program_scheduled s WHERE s.scheduled_id = $1",
            SCHEDULE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch program scheduled")?;

        Ok(row.as_ref().map(schedule_from_row))
    }

    async fn list_schedules(&self, filter: Option<ScheduleFilter>) -> Result<Vec<ProgramScheduled>> {
        let rows = match filter {
            None => {
                let sql = format!(
                    "SELECT {} FROM program_scheduled s ORDER BY s.scheduled_id",
                    SCHEDULE_COLUMNS
                );
                sqlx::query(&sql).fetch_all(&self.pool).await
            }
            Some(ScheduleFilter::CollegeName(name)) => {
                let sql = format!(
                    "SELECT {} FROM program_scheduled s \
                     JOIN colleges c ON c.college_reg_id = s.college_reg_id \
                     WHERE c.college_name = $1 ORDER BY s.scheduled_id",
                    SCHEDULE_COLUMNS
                );
                sqlx::query(&sql).bind(name).fetch_all(&self.pool).await
            }
            Some(ScheduleFilter::StartDate(date)) => {
                let sql = format!(
                    "SELECT {} FROM program_scheduled s WHERE s.start_date = $1 ORDER BY s.scheduled_id",
                    SCHEDULE_COLUMNS
                );
                sqlx::query(&sql).bind(date).fetch_all(&self.pool).await
            }
            Some(ScheduleFilter::CollegeRegId(id)) => self.schedules_where("college_reg_id", id).await,
            Some(ScheduleFilter::BranchId(id)) => self.schedules_where("branch_id", id).await,
            Some(ScheduleFilter::ProgramId(id)) => self.schedules_where("program_id", id).await,
            Some(ScheduleFilter::CourseId(id)) => self.schedules_where("course_id", id).await,
            Some(ScheduleFilter::UniversityId(id)) => {
                self.schedules_where("university_id", id).await
            }
        }
        .context("Failed to list program schedules")?;

        Ok(rows.iter().map(schedule_from_row).collect())
    }

    async fn insert_schedule(
        &self,
        refs: ScheduleRefs,
        dates: ScheduleDates,
    ) -> Result<ProgramScheduled> {
        let row = sqlx::query(
            r#"
            INSERT INTO program_scheduled
                (start_date, end_date, university_id, college_reg_id, program_id, course_id, branch_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING scheduled_id
            "#,
        )
        .bind(dates.start_date)
        .bind(dates.end_date)
        .bind(refs.university_id)
        .bind(refs.college_reg_id)
        .bind(refs.program_id)
        .bind(refs.course_id)
        .bind(refs.branch_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert program scheduled")?;

        Ok(ProgramScheduled {
            scheduled_id: row.get("scheduled_id"),
            start_date: dates.start_date,
            end_date: dates.end_date,
            university_id: refs.university_id,
            college_reg_id: refs.college_reg_id,
            program_id: refs.program_id,
            course_id: refs.course_id,
            branch_id: refs.branch_id,
        })
    }

    async fn update_schedule_dates(&self, id: Id, dates: ScheduleDates) -> Result<()> {
        let result = sqlx::query(
            "UPDATE program_scheduled SET start_date = $2, end_date = $3 WHERE scheduled_id = $1",
        )
        .bind(id)
        .bind(dates.start_date)
        .bind(dates.end_date)
        .execute(&self.pool)
        .await
        .context("Failed to update program scheduled")?;

        if result.rows_affected() == 0 {
            bail!("program scheduled {} does not exist", id);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ApplicationStore for PostgresStore {
    async fn get_application(&self, id: Id) -> Result<Option<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE application_id = $1",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch application")?;

        row.as_ref().map(application_from_row).transpose()
    }

    async fn list_applications_for_schedule(&self, scheduled_id: Id) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE scheduled_id = $1 ORDER BY application_id",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(scheduled_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list applications for program scheduled")?;

        rows.iter().map(application_from_row).collect()
    }

    async fn insert_application(
        &self,
        scheduled_id: Id,
        application: NewApplication,
    ) -> Result<Application> {
        let status = ApplicationStatus::Pending;
        let row = sqlx::query(
            r#"
            INSERT INTO applications
                (applicant_full_name, email_id, date_of_birth, highest_qualification,
                 final_year_percentage, goals, application_status, scheduled_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING application_id
            "#,
        )
        .bind(&application.applicant_full_name)
        .bind(&application.email_id)
        .bind(application.date_of_birth)
        .bind(&application.highest_qualification)
        .bind(application.final_year_percentage)
        .bind(&application.goals)
        .bind(status.as_str())
        .bind(scheduled_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert application")?;

        Ok(Application {
            application_id: row.get("application_id"),
            applicant_full_name: application.applicant_full_name,
            email_id: application.email_id,
            date_of_birth: application.date_of_birth,
            highest_qualification: application.highest_qualification,
            final_year_percentage: application.final_year_percentage,
            goals: application.goals,
            application_status: status,
            scheduled_id,
        })
    }
}

#[async_trait::async_trait]
impl DeletionStore for PostgresStore {
    async fn apply_deletions(&self, deletions: &[Deletion]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin deletion transaction")?;

        for deletion in deletions {
            let sql = match deletion {
                Deletion::Application(_) => "DELETE FROM applications WHERE application_id = $1",
                Deletion::Schedule(_) => "DELETE FROM program_scheduled WHERE scheduled_id = $1",
                Deletion::Branch(_) => "DELETE FROM branches WHERE branch_id = $1",
                Deletion::Course(_) => "DELETE FROM courses WHERE course_id = $1",
            };
            let result = sqlx::query(sql)
                .bind(deletion.id())
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete {} {}", deletion.kind(), deletion.id()))?;

            // Dropping `tx` on the early return rolls the transaction back.
            if result.rows_affected() == 0 {
                bail!("{} {} does not exist", deletion.kind(), deletion.id());
            }
        }

        tx.commit()
            .await
            .context("Failed to commit deletion transaction")?;
        Ok(())
    }
}

impl Store for PostgresStore {}
