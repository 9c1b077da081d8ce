//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let config = factory::reiatsu_config::create_config(&db).await?;
//! let player = factory::reiatsu_player::create_player(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let config = factory::reiatsu_config::ReiatsuConfigFactory::new(&db)
//!     .spawn_speed("fast")
//!     .pending_real(Some(42))
//!     .build()
//!     .await?;
//!
//! let owner = factory::reiatsu_player::ReiatsuPlayerFactory::new(&db)
//!     .class("illusionist")
//!     .active_skill(factory::helpers::decoy_payload(7, config.guild_id as u64, None))
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod reiatsu_config;
pub mod reiatsu_player;
