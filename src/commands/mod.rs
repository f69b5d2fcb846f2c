pub mod plot;
pub mod render;
pub mod validate;
