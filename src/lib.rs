//! # GitHub Repos Bot
//!
//! Search GitHub repositories with loosely structured text and get back
//! chat-ready HTML.
//!
//! ```text
//! "anime sort:stars language:Python"
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ parse_query  │──▶│ GitHubClient │──▶│ render (≤ 4096)  │
//! │ text+filters │   │ /search/repo │   │ or inline (≤ 50) │
//! └──────────────┘   └──────────────┘   └──────────────────┘
//!                                                │
//!                      ┌─────────────────────────┤
//!                      ▼                         ▼
//!                 ┌──────────┐             ┌──────────┐
//!                 │   CLI    │             │   HTTP   │
//!                 │(ghrepos) │             │  (axum)  │
//!                 └──────────┘             └──────────┘
//! ```
//!
//! The pure pipeline (parsing, truncation, rendering) lives in the
//! `github-repos-core` crate. This crate adds the I/O around it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`github`] | GitHub REST search gateway |
//! | [`reply`] | Per-request reply policy and notices |
//! | [`intro`] | Help and source texts |
//! | [`server`] | HTTP front end |

pub mod config;
pub mod github;
pub mod intro;
pub mod logging;
pub mod reply;
pub mod server;
