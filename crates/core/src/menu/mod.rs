//! The menu: categories, line records, and the catalog.

pub mod catalog;
pub mod category;
pub mod line;

pub use catalog::{LineError, MenuCatalog};
pub use category::{MenuCategory, PriceArity, PriceTier, UnknownCategory};
pub use line::{DualLine, LineField, MenuLine, MenuOffer, PLACEHOLDER_NAME, SingleLine, TripleLine};
