mod view;
mod view_model;

pub use view::PriceItemDetails;
pub use view_model::PriceItemDetailsVm;
