pub mod aggregate;

pub use aggregate::{FileType, NewProductFile, PrincipalUpdate, ProductFile, ENDPOINT};
