use std::sync::Arc;

use chrono::NaiveDate;

use crate::logic::application_ops::ApplicationOperations;
use crate::logic::cascade::DeletionPlan;
use crate::logic::compose::ScheduleGraph;
use crate::logic::error::{non_empty, require, AdmissionResult};
use crate::model::{
    EntityKind, Id, ProgramScheduled, ProgramScheduledResponse, ScheduleDates, ScheduleFilter,
    ScheduleRefs,
};
use crate::store::traits::{Deletion, Store};

/// Dated program offerings and their composed read model.
pub struct ScheduleOperations<S> {
    store: Arc<S>,
    applications: ApplicationOperations<S>,
}

impl<S> Clone for ScheduleOperations<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            applications: self.applications.clone(),
        }
    }
}

impl<S: Store> ScheduleOperations<S> {
    pub fn new(store: Arc<S>, applications: ApplicationOperations<S>) -> Self {
        Self {
            store,
            applications,
        }
    }

    /// Schedule a course/branch offering. Every reference is resolved, in
    /// argument order, before anything is written.
    pub async fn add_schedule(
        &self,
        university_id: Id,
        college_id: Id,
        program_id: Id,
        course_id: Id,
        branch_id: Id,
        dates: ScheduleDates,
    ) -> AdmissionResult<ProgramScheduledResponse> {
        let university = require(
            self.store.get_university(university_id).await?,
            EntityKind::University,
            university_id,
        )?;
        let college = require(
            self.store.get_college(college_id).await?,
            EntityKind::College,
            college_id,
        )?;
        let program = require(
            self.store.get_program(program_id).await?,
            EntityKind::Program,
            program_id,
        )?;
        let course = require(
            self.store.get_course(course_id).await?,
            EntityKind::Course,
            course_id,
        )?;
        let branch = require(
            self.store.get_branch(branch_id).await?,
            EntityKind::Branch,
            branch_id,
        )?;

        let refs = ScheduleRefs {
            university_id: university.university_id,
            college_reg_id: college.college_reg_id,
            program_id: program.program_id,
            course_id: course.course_id,
            branch_id: branch.branch_id,
        };
        let schedule = self.store.insert_schedule(refs, dates).await?;
        log::info!(
            "Program scheduled {} created for course {} branch {}",
            schedule.scheduled_id,
            course_id,
            branch_id
        );

        let graph = ScheduleGraph {
            schedule,
            university,
            college,
            program,
            course,
            branch,
        };
        Ok(graph.compose())
    }

    pub async fn view_all(&self) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        let schedules = self.store.list_schedules(None).await?;
        let schedules = non_empty(schedules, || "No Program Scheduled Found".to_string())?;
        self.compose_all(schedules).await
    }

    pub async fn find_by_id(&self, id: Id) -> AdmissionResult<ProgramScheduledResponse> {
        let schedule = self.get(id).await?;
        Ok(ScheduleGraph::load(self.store.as_ref(), schedule).await?.compose())
    }

    /// Overwrite start and end date; references are left untouched.
    pub async fn update_schedule(
        &self,
        id: Id,
        dates: ScheduleDates,
    ) -> AdmissionResult<ProgramScheduledResponse> {
        self.get(id).await?;
        self.store.update_schedule_dates(id, dates).await?;
        let schedule = self.get(id).await?;
        log::info!("Program scheduled {} moved to {} .. {}", id, dates.start_date, dates.end_date);

        Ok(ScheduleGraph::load(self.store.as_ref(), schedule).await?.compose())
    }

    /// Record the removal of a schedule after every application filed against it.
    pub async fn plan_delete(&self, id: Id, plan: &mut DeletionPlan) -> AdmissionResult<()> {
        self.get(id).await?;

        let applications = self.store.list_applications_for_schedule(id).await?;
        log::debug!(
            "Program scheduled {} cascades to {} applications",
            id,
            applications.len()
        );
        for application in applications {
            self.applications
                .plan_delete(application.application_id, plan)
                .await?;
        }

        plan.push(Deletion::Schedule(id));
        Ok(())
    }

    pub async fn delete_by_id(&self, id: Id) -> AdmissionResult<()> {
        let mut plan = DeletionPlan::new();
        self.plan_delete(id, &mut plan).await?;
        plan.apply(self.store.as_ref()).await?;
        log::info!("Deleted program scheduled {} ({} rows)", id, plan.len());
        Ok(())
    }

    /// Run a filtered query and compose every hit. No hits is NotFound.
    pub async fn find_by(
        &self,
        filter: ScheduleFilter,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        let description = filter.describe();
        let schedules = self.store.list_schedules(Some(filter)).await?;
        let schedules = non_empty(schedules, || {
            format!("No Program Scheduled for {}", description)
        })?;
        self.compose_all(schedules).await
    }

    pub async fn find_by_college_name(
        &self,
        college_name: &str,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::CollegeName(college_name.to_string()))
            .await
    }

    pub async fn find_by_start_date(
        &self,
        start_date: NaiveDate,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::StartDate(start_date)).await
    }

    pub async fn find_by_college_reg_id(
        &self,
        college_reg_id: Id,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::CollegeRegId(college_reg_id)).await
    }

    pub async fn find_by_branch_id(
        &self,
        branch_id: Id,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::BranchId(branch_id)).await
    }

    pub async fn find_by_program_id(
        &self,
        program_id: Id,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::ProgramId(program_id)).await
    }

    pub async fn find_by_course_id(
        &self,
        course_id: Id,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::CourseId(course_id)).await
    }

    pub async fn find_by_university_id(
        &self,
        university_id: Id,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        self.find_by(ScheduleFilter::UniversityId(university_id)).await
    }

    async fn get(&self, id: Id) -> AdmissionResult<ProgramScheduled> {
        require(
            self.store.get_schedule(id).await?,
            EntityKind::ProgramScheduled,
            id,
        )
    }

    async fn compose_all(
        &self,
        schedules: Vec<ProgramScheduled>,
    ) -> AdmissionResult<Vec<ProgramScheduledResponse>> {
        let mut responses = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            let graph = ScheduleGraph::load(self.store.as_ref(), schedule).await?;
            responses.push(graph.compose());
        }
        Ok(responses)
    }
}
