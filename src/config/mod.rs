//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::CommentsConfig;
pub use site::{ENV_ACCESS_TOKEN, ENV_API_ENDPOINT};
