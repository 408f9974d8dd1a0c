//! # GitHub Repos Core
//!
//! Pure logic for the GitHub repository search bot: data models, query
//! parsing, description truncation, HTML rendering, and the search
//! gateway trait.
//!
//! This crate performs no network or filesystem I/O. Every function in
//! [`query`], [`truncate`], and [`render`] is total and safe to call from
//! many tasks at once.
//!
//! ```text
//! raw text ─▶ query::parse_query ─▶ SearchRequest ─▶ SearchGateway
//!                                                        │
//!             render::render_repositories ◀── records ◀──┘
//! ```

pub mod gateway;
pub mod models;
pub mod query;
pub mod render;
pub mod truncate;
