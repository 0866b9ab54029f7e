//! Records mirrored from the Daily Topics backend, the request payloads sent
//! to it, and the small amount of client-side logic that operates on them.

pub mod filter;
pub mod models;
pub mod payloads;
pub mod timestamp;
pub mod validation;

pub use filter::{favorite_label, filter_by_category};
pub use models::{
    ActionResponse, Author, Category, CategoryId, CategoryRef, CategorySummary, LoginResponse,
    Topic, TopicId, User, UserId,
};
pub use payloads::{FavoriteRequest, LoginCredentials, NewCategory, NewTopic, RegisterUser};
pub use timestamp::Timestamp;
pub use validation::ValidationError;
