pub mod catalog;

mod macros;

pub use catalog::CatalogCache;
