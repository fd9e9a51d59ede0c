//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (allocations,
//!   rooms, health)
//! - **Schemas**: Request and response bodies plus the shared error envelope
//! - **Security**: The `x-api-key` header scheme guarding booking endpoints
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::allocations::{
    AllocationResponseBody, CreateAllocationRequestBody, ListAllocationsResponseBody,
    UpdateAllocationRequestBody,
};
use crate::inbound::http::auth::API_KEY_HEADER;
use crate::inbound::http::rooms::RoomResponseBody;

/// Enrich the generated document with the API key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                API_KEY_HEADER,
                "Shared API key required on booking endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Roombook backend API",
        description = "HTTP interface for meeting-room allocation management and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::allocations::create_allocation,
        crate::inbound::http::allocations::update_allocation,
        crate::inbound::http::allocations::delete_allocation,
        crate::inbound::http::allocations::get_allocation,
        crate::inbound::http::allocations::list_allocations,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CreateAllocationRequestBody,
        UpdateAllocationRequestBody,
        AllocationResponseBody,
        ListAllocationsResponseBody,
        RoomResponseBody,
    )),
    tags(
        (name = "allocations", description = "Operations managing room allocations"),
        (name = "rooms", description = "Read access to bookable rooms"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
