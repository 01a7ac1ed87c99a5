pub mod cli;
pub mod config;
pub mod feed;
pub mod http;
pub mod logging;
pub mod manager;

pub use cli::{handle_command, ReaderArgs, ReaderCommands};
pub use config::ClientConfig;
pub use feed::{FeedState, LoadTicket};
pub use http::HttpNewsApi;
pub use logging::{init_logging, Logger};
pub use manager::{DetailParams, FeedManager};

pub mod prelude {
    pub use super::{ClientConfig, FeedManager, HttpNewsApi};
    pub use nu_core::{DisplayMode, Error, NewsApi, Result};
}
