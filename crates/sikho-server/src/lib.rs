//! sikho-server — JSON HTTP API over the sikho datasets.
//!
//! A deliberately small HTTP/1.1 layer on tokio: each connection carries one
//! request, which the [`Router`] answers from a shared [`sikho_core::Catalog`].

pub mod config;
pub mod http;
pub mod router;
pub mod server;

pub use config::{load_config_from, ServerConfig};
pub use router::Router;
pub use server::Server;
