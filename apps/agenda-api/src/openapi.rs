//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agenda API",
        version = "0.1.0",
        description = "Calendar REST API for managing users, categories and events",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::AuthApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "Auth", description = "Registration, login and session endpoints"),
        (name = "Users", description = "User profile endpoints"),
        (name = "Categories", description = "Event category endpoints"),
        (name = "Events", description = "Calendar event endpoints")
    )
)]
pub struct ApiDoc;
