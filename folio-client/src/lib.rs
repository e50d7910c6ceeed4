//! Folio Client - REST client, profile cache and local theme selection
//!
//! Library half of the `folio` command-line tool.

pub mod api_client;
pub mod config;
pub mod error;
pub mod profile_store;
pub mod render;
pub mod theme;

pub use api_client::RestClient;
pub use config::{ClientConfig, ConfigError, ThemeConfig};
pub use error::{ApiClientError, ClientError, ClientResult};
pub use profile_store::{ProfileFetcher, ProfileStore};
pub use theme::open_selection;
