use axum::{
    Router,
    routing::{get, patch},
};

use crate::modules::users::controller::{get_me, update_avatar};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/avatar", patch(update_avatar))
}
