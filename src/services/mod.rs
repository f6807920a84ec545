pub mod catalog;
pub mod providers;
pub mod recommendations;
pub mod text;

pub use catalog::CatalogLoader;
