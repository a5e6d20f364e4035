//! Client for the ndls.org.cn standard validity service.
//!
//! The crate is split along one seam: [`StandardApi`] abstracts the two
//! HTTP endpoints, [`NdlsClient`] implements them over blocking reqwest,
//! and [`Checker`] orchestrates lookups on top of any implementation so
//! the orchestration is testable without a network.

pub mod api;
pub mod checker;
pub mod client;
pub mod error;

pub use api::{DetailData, Envelope, SearchData, SearchHit, StandardApi};
pub use checker::{Checker, DEFAULT_DELAY};
pub use client::NdlsClient;
pub use error::{ClientError, Result};
