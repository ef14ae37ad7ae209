use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
mod repo;
mod repo_types;

pub use dto::{AuthResponse, LoginRequest, SignupRequest};
pub use extractors::AuthUser;
pub use repo::{PgUserRepo, UserRepo};

#[cfg(test)]
pub use dto::MeResponse;
#[cfg(test)]
pub use repo::CreateUserError;
#[cfg(test)]
pub use repo_types::User;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
