//! Client context and fetch operations

mod builder;
mod news;

pub use builder::{DEFAULT_REQUEST_TIMEOUT, Huginn, HuginnBuilder};
pub use news::{ClientStatus, NewsClient};
