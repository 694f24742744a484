//! Edit dialog of an existing product. Products are created through the
//! wizard only.

mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsVm;
