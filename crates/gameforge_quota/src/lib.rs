//! Per-principal daily usage quota.
//!
//! The [`QuotaGovernor`] decides whether a principal may run another
//! generation today. Counters roll over lazily: the first read on a new
//! calendar day resets the count, whether or not anything is incremented
//! afterwards.
//!
//! # Example
//!
//! ```
//! use gameforge_core::Principal;
//! use gameforge_quota::{InMemoryQuotaStore, QuotaGovernor};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> gameforge_error::GameforgeResult<()> {
//! let governor = QuotaGovernor::new(Arc::new(InMemoryQuotaStore::new()), 2);
//! let alice = Principal::new("alice");
//!
//! assert!(governor.can_use(&alice).await?);
//! governor.increment(&alice).await?;
//! governor.increment(&alice).await?;
//! assert!(!governor.can_use(&alice).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod governor;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameforgeConfig, QuotaConfig, QuotaConfigBuilder};
pub use governor::QuotaGovernor;
pub use memory::InMemoryQuotaStore;
