pub mod aggregate;

pub use aggregate::{parse_date, PriceList, PriceListForm, ENDPOINT};
