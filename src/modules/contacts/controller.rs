use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::contacts::model::{
    Contact, ContactQueryParams, CreateContactRequest, PaginatedContactsResponse, PaginationMeta,
    SearchParams, UpdateContactRequest,
};
use crate::modules::contacts::service::ContactService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Duplicate contact email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = ContactService::create_contact(&state.db, user.id, dto).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// List contacts with pagination
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ContactQueryParams),
    responses(
        (status = 200, description = "Paginated contact list", body = PaginatedContactsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn get_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<ContactQueryParams>,
) -> Result<Json<PaginatedContactsResponse>, AppError> {
    let limit = params.limit();
    let page = params.page();

    let (contacts, total) =
        ContactService::get_contacts(&state.db, user.id, limit, params.offset()).await?;

    let total_pages = (total as f64 / limit as f64).ceil() as i64;

    Ok(Json(PaginatedContactsResponse {
        data: contacts,
        meta: PaginationMeta {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}

/// Get a contact by ID
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact details", body = Contact),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn get_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, AppError> {
    let contact = ContactService::get_contact(&state.db, id, user.id).await?;
    Ok(Json(contact))
}

/// Update a contact
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 400, description = "Duplicate contact email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn update_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateContactRequest>,
) -> Result<Json<Contact>, AppError> {
    let contact = ContactService::update_contact(&state.db, id, user.id, dto).await?;
    Ok(Json(contact))
}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ContactService::delete_contact(&state.db, id, user.id).await?;
    Ok(Json(json!({"message": "Contact deleted successfully"})))
}

/// Search contacts by name or email substring
#[utoipa::path(
    get,
    path = "/api/contacts/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching contacts", body = Vec<Contact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn search_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = ContactService::search_contacts(&state.db, user.id, &params.query).await?;
    Ok(Json(contacts))
}

/// List contacts with a birthday in the next 7 days
#[utoipa::path(
    get,
    path = "/api/contacts/upcoming-birthdays",
    responses(
        (status = 200, description = "Contacts with upcoming birthdays", body = Vec<Contact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = ContactService::upcoming_birthdays(&state.db, user.id).await?;
    Ok(Json(contacts))
}
