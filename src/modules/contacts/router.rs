use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::contacts::controller::{
    create_contact, delete_contact, get_contact, get_contacts, search_contacts, update_contact,
    upcoming_birthdays,
};
use crate::state::AppState;

pub fn init_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contact).get(get_contacts))
        .route("/search", get(search_contacts))
        .route("/upcoming-birthdays", get(upcoming_birthdays))
        .route(
            "/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
