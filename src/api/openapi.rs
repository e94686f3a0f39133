//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::dto::{
    CreateJournalEntryRequest, CreateTaskRequest, DeleteResponse, JournalEntryDto,
    JournalListResponse, TaskDto, TaskListResponse, UpdateJournalEntryRequest, UpdateTaskRequest,
};
use crate::api::handlers::system::HealthResponse;
use crate::api::handlers::{journal, system, task};
use crate::error::ErrorResponse;

/// Generated API description served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "taskjournal",
        description = "Tasks and journal entries behind a shared bearer secret"
    ),
    paths(
        system::health_handler,
        task::list_tasks,
        task::create_task,
        task::update_task,
        task::delete_task,
        journal::list_entries,
        journal::create_entry,
        journal::update_entry,
        journal::delete_entry,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        DeleteResponse,
        CreateTaskRequest,
        UpdateTaskRequest,
        TaskDto,
        TaskListResponse,
        CreateJournalEntryRequest,
        UpdateJournalEntryRequest,
        JournalEntryDto,
        JournalListResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Tasks", description = "Task lifecycle"),
        (name = "Journal", description = "Journal entry lifecycle"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` security scheme referenced by handlers.
#[derive(Debug)]
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
