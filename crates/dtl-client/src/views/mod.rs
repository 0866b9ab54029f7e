//! Page-level logic on top of [`ApiClient`](crate::ApiClient).
//!
//! Each view owns whatever state its page displays and records the message
//! the user should see. None of them cache across fetches.

pub mod catalog;
pub mod feed;
pub mod profile;
pub mod session;

pub use catalog::Catalog;
pub use feed::ReaderFeed;
pub use profile::Profile;
pub use session::Session;
