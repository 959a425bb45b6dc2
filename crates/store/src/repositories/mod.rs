//! Repository abstractions for data files.
//!
//! Repositories provide a clean interface over the JSON files, hiding the
//! file layout from the rest of the application.

pub mod rate;
pub mod user;

pub use rate::RateRepository;
pub use user::UserRepository;
