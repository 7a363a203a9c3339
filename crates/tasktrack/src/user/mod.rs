//! User accounts: credential store and registration.

mod models;
mod repository;
mod service;

pub use models::{FieldError, NewUser, RegisterRequest, User, UserInfo};
pub use repository::UserRepository;
pub use service::{UserError, UserService, validate_registration};
