use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::modules::contacts::model::{
    Contact, CreateContactRequest, PaginatedContactsResponse, PaginationMeta, UpdateContactRequest,
};
use crate::modules::users::model::{UpdateAvatarRequest, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::confirm_email,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_avatar,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::get_contacts,
        crate::modules::contacts::controller::get_contact,
        crate::modules::contacts::controller::update_contact,
        crate::modules::contacts::controller::delete_contact,
        crate::modules::contacts::controller::search_contacts,
        crate::modules::contacts::controller::upcoming_birthdays,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            UpdateAvatarRequest,
            Contact,
            CreateContactRequest,
            UpdateContactRequest,
            PaginationMeta,
            PaginatedContactsResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and email verification"),
        (name = "Users", description = "Authenticated user profile"),
        (name = "Contacts", description = "Per-user contact management")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
