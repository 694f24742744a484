pub mod aggregate;

pub use aggregate::{ExtraProperties, NewPresentation, Presentation, PresentationForm, ENDPOINT};
