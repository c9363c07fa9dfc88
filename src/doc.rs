//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::game::SessionStatus;
use crate::service::SessionReport;

/// OpenAPI document for the game API, served through Swagger UI.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Word Guess API",
        description = "HTTP interface for starting, playing, and reporting word-guessing games."
    ),
    paths(
        crate::server::start,
        crate::server::guess,
        crate::server::statistics,
        crate::server::delete_user,
    ),
    components(schemas(SessionReport, SessionStatus)),
    tags(
        (name = "game", description = "Word-guessing game operations")
    )
)]
pub struct ApiDoc;
