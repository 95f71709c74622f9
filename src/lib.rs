//! # Git Hosting Provider Integration Library
//!
//! A provider-neutral contract for git hosting products, with a Gitea
//! backend adapter:
//! - One [`GitProvider`] trait covering repositories, releases, pull
//!   requests, issues, commit statuses, webhooks, branches and users
//! - A neutral data model shared by all backends
//! - Capability descriptors so callers can branch on what a backend supports
//! - Explicit not-supported sentinels for operations a backend cannot do
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_gitea::{GiteaConfig, GiteaProvider, GitProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GiteaConfig::builder()
//!         .server_url("https://gitea.example.com")
//!         .token("xxxxxxxxxxxx")
//!         .username("pipeline-bot")
//!         .build()?;
//!
//!     let provider = GiteaProvider::new(config)?;
//!
//!     // List repositories of the authenticated user
//!     let repos = provider.list_repositories("").await?;
//!     for repo in repos {
//!         println!("{}", repo.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// The provider-neutral contract
pub mod provider;

// Gitea wire types and transport
pub mod api;
pub mod client;

// The Gitea backend adapter
pub mod gitea;

// Re-exports for convenience
pub use client::GiteaClient;
pub use config::{ForkPollConfig, GiteaConfig, GiteaConfigBuilder};
pub use errors::{ProviderError, ProviderErrorKind, ProviderResult};
pub use gitea::GiteaProvider;
pub use provider::{Capabilities, GitProvider, ProviderKind};
pub use types::*;
