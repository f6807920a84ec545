pub mod answers;
pub mod catalog;
pub mod storefront;

pub use answers::Answers;
pub use catalog::{CatalogItem, Gender, PriceBand, Recommendation};
pub use storefront::{ProductConnection, RawProduct};
