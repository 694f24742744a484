pub mod aggregate;

pub use aggregate::{CompleteProductRequest, Product, ProductForm, COMPLETE_ENDPOINT, ENDPOINT};
