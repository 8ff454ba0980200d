//! Domain models for the Ponsiv API.
//!
//! Row types derive `sqlx::FromRow` for the runtime query API; response
//! types derive `Serialize` and shape rows the way clients consume them
//! (nested brand/category summaries, decoded tag lists).

pub mod outfit;
pub mod product;
pub mod session;
pub mod wardrobe;

pub use outfit::Outfit;
pub use product::{BrandSummary, CategorySummary, FeedProduct, FeedProductRow};
pub use session::{CurrentUser, keys as session_keys};
pub use wardrobe::{WardrobeItem, WardrobeItemRow, WardrobeProduct};
