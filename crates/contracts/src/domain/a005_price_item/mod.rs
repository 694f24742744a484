pub mod aggregate;

pub use aggregate::{PriceItem, PriceItemForm, ENDPOINT};
