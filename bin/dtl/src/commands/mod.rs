//! Command handlers, one module per page of the service.

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod favorites;
pub(crate) mod feed;
pub(crate) mod profile;
pub(crate) mod topics;

pub(crate) use categories::CategoryCommands;
pub(crate) use favorites::FavoriteCommands;
pub(crate) use topics::TopicCommands;
