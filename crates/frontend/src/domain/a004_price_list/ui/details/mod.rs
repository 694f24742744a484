mod view;
mod view_model;

pub use view::PriceListDetails;
pub use view_model::PriceListDetailsVm;
