mod summary;

pub use summary::{ProductListing, ProductSummary};
