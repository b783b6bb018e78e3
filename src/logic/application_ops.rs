use std::sync::Arc;

use crate::logic::cascade::DeletionPlan;
use crate::logic::error::{non_empty, require, AdmissionResult};
use crate::model::{Application, EntityKind, Id, NewApplication};
use crate::store::traits::{Deletion, Store};

/// Applications submitted against a program schedule.
pub struct ApplicationOperations<S> {
    store: Arc<S>,
}

impl<S> Clone for ApplicationOperations<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> ApplicationOperations<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn add_application(
        &self,
        scheduled_id: Id,
        application: NewApplication,
    ) -> AdmissionResult<Application> {
        require(
            self.store.get_schedule(scheduled_id).await?,
            EntityKind::ProgramScheduled,
            scheduled_id,
        )?;

        let application = self
            .store
            .insert_application(scheduled_id, application)
            .await?;
        log::info!(
            "Application {} submitted for program scheduled {}",
            application.application_id,
            scheduled_id
        );
        Ok(application)
    }

    pub async fn find_by_id(&self, id: Id) -> AdmissionResult<Application> {
        require(
            self.store.get_application(id).await?,
            EntityKind::Application,
            id,
        )
    }

    pub async fn find_by_schedule(&self, scheduled_id: Id) -> AdmissionResult<Vec<Application>> {
        let applications = self
            .store
            .list_applications_for_schedule(scheduled_id)
            .await?;
        non_empty(applications, || {
            format!("No Application found for Program Scheduled {}", scheduled_id)
        })
    }

    /// Record the removal of one application. Applications have no dependents.
    pub async fn plan_delete(&self, id: Id, plan: &mut DeletionPlan) -> AdmissionResult<()> {
        self.find_by_id(id).await?;
        plan.push(Deletion::Application(id));
        Ok(())
    }

    pub async fn delete_by_id(&self, id: Id) -> AdmissionResult<()> {
        let mut plan = DeletionPlan::new();
        self.plan_delete(id, &mut plan).await?;
        plan.apply(self.store.as_ref()).await?;
        log::info!("Deleted application {}", id);
        Ok(())
    }
}
