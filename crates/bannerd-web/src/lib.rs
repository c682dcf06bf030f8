//! # bannerd Web
//!
//! The HTTP front end for bannerd.
//!
//! This crate provides:
//! - A tokio TCP accept loop speaking just enough HTTP/1.1
//! - Routing for the banner form, the render endpoint and downloads
//! - Font lookup with an optional parsed-table cache
//! - Output persistence and zip packaging
//! - Disk-backed HTML templates with placeholder substitution
//!
//! The rendering core (`bannerd-core`) stays pure; everything that can fail
//! - missing fonts, missing templates, bad requests, write errors - lives
//! here and maps onto user-facing status pages.

pub mod error;
pub mod fonts;
pub mod handlers;
pub mod http;
pub mod server;
pub mod storage;
pub mod templates;
pub mod zip;

pub use error::{Result, WebError};
pub use fonts::FontStore;
pub use server::{AppState, BannerServer};
pub use storage::OutputStore;
pub use templates::Templates;
