//! Database repository layer.
//!
//! Repositories wrap SeaORM entity queries for the two game tables and return domain models.
//! They are generic over `ConnectionTrait` so the capture path can run several of them inside
//! one `DatabaseTransaction`. Flag changes that arbitrate between competing resolvers are
//! conditional updates whose `bool` result reports whether this caller won.

pub mod reiatsu_config;
pub mod reiatsu_player;

#[cfg(test)]
mod test;
