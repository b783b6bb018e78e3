use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::handlers::{self, AppState};
use crate::api::{application_handlers, catalog_handlers, course_handlers, schedule_handlers};
use crate::store::traits::Store;

/// Routes sharing a prefix must name their first parameter alike, so the
/// create routes use `:id` for the college and the university respectively.
pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    let api = Router::new()
        // Courses
        .route("/courses", get(course_handlers::list_courses::<S>))
        .route(
            "/course/coursename/:name",
            get(course_handlers::get_course_by_name::<S>),
        )
        .route(
            "/course/eligibility/:eligibility",
            get(course_handlers::list_courses_by_eligibility::<S>),
        )
        .route(
            "/course/coursedetail/:id",
            get(course_handlers::get_course::<S>),
        )
        .route(
            "/course/:id/program/:program_id",
            post(course_handlers::create_course::<S>),
        )
        .route(
            "/course/update/:id",
            put(course_handlers::update_course::<S>),
        )
        .route(
            "/course/:id",
            delete(course_handlers::delete_course::<S>),
        )
        .route(
            "/course/delete/coursename/:name",
            delete(course_handlers::delete_course_by_name::<S>),
        )
        .route(
            "/courses/:id/branches",
            get(course_handlers::list_course_branches::<S>),
        )
        .route(
            "/courses/program/:program_id",
            get(course_handlers::list_program_courses::<S>),
        )
        // Program schedules
        .route(
            "/programscheduled/:id/:college_id/:program_id/:course_id/:branch_id",
            post(schedule_handlers::create_schedule::<S>),
        )
        .route(
            "/allprogramscheduled",
            get(schedule_handlers::list_schedules::<S>),
        )
        .route(
            "/programscheduled/:id",
            get(schedule_handlers::get_schedule::<S>),
        )
        .route(
            "/deleteprogramscheduled/:id",
            delete(schedule_handlers::delete_schedule::<S>),
        )
        .route(
            "/update/programscheduled/:id",
            put(schedule_handlers::update_schedule::<S>),
        )
        .route(
            "/programscheduled/collegename/:name",
            get(schedule_handlers::schedules_by_college_name::<S>),
        )
        .route(
            "/programscheduled/date/:date",
            get(schedule_handlers::schedules_by_start_date::<S>),
        )
        .route(
            "/programscheduled/collegeId/:id",
            get(schedule_handlers::schedules_by_college::<S>),
        )
        .route(
            "/programscheduled/branchId/:id",
            get(schedule_handlers::schedules_by_branch::<S>),
        )
        .route(
            "/programscheduled/programId/:id",
            get(schedule_handlers::schedules_by_program::<S>),
        )
        .route(
            "/programscheduled/courseId/:id",
            get(schedule_handlers::schedules_by_course::<S>),
        )
        .route(
            "/programscheduled/universityId/:id",
            get(schedule_handlers::schedules_by_university::<S>),
        )
        // Applications
        .route(
            "/application/:id",
            post(application_handlers::create_application::<S>)
                .get(application_handlers::get_application::<S>)
                .delete(application_handlers::delete_application::<S>),
        )
        .route(
            "/applications/schedule/:scheduled_id",
            get(application_handlers::list_schedule_applications::<S>),
        )
        // Catalog
        .route(
            "/university",
            post(catalog_handlers::create_university::<S>),
        )
        .route(
            "/university/:id",
            get(catalog_handlers::get_university::<S>),
        )
        .route("/college", post(catalog_handlers::create_college::<S>))
        .route("/college/:id", get(catalog_handlers::get_college::<S>))
        .route("/program", post(catalog_handlers::create_program::<S>))
        .route("/programs", get(catalog_handlers::list_programs::<S>))
        .route("/program/:id", get(catalog_handlers::get_program::<S>))
        .route(
            "/branch/:course_id",
            post(catalog_handlers::create_branch::<S>),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}
