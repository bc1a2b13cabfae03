//! `rebill-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod context;
pub mod error;
pub mod id;
pub mod money;
pub mod patch;

pub use context::CompanyContext;
pub use error::{DomainError, DomainResult};
pub use id::{CompanyId, RecordId, UserId};
pub use money::{Currency, Money, format_amount};
pub use patch::Patch;
