pub mod result_renderer;
pub mod validator;

pub use result_renderer::{render, DisplayModel, TrustedMarkup};
pub use validator::{Accepted, Validator};
