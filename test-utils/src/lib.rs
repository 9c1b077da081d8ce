//! Reiatsu Test Utils
//!
//! Provides shared testing utilities for the Reiatsu bot. This crate offers a builder for
//! creating test contexts backed by in-memory SQLite databases plus factories for the game's
//! config and player rows.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Row factories with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_spawn() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_reiatsu_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
