mod product;
mod specs;

pub use product::Product;
pub use specs::{Specification, SpecificationTable, Specifications};
