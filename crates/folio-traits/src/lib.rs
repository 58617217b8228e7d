//! # Folio Traits
//!
//! Trait definitions for the Folio analytics engine.
//!
//! This crate contains ONLY trait definitions with ZERO runtime dependencies.
//! All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`market_data`]: Traits for historical price sources
//! - [`reference_data`]: Traits for universe and classification sources
//!
//! ## Dependency Injection
//!
//! The analytics engine uses these traits via dependency injection:
//!
//! ```ignore
//! AnalyticsEngineBuilder::new()
//!     .with_prices(impl PriceSource)
//!     .with_universe(impl UniverseSource)
//!     .with_classifications(impl ClassificationSource)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;
pub mod reference_data;

// Re-export commonly used types
pub use error::{TraitError, TraitResult};
pub use market_data::{DateRange, PriceSource, SourceType};
pub use reference_data::{
    ClassificationRecord, ClassificationSource, UniverseEntry, UniverseSource, DEFAULT_ASSET_CLASS,
};
