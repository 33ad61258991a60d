//! Form rendering

mod channel_form;
mod field_renderer;

pub use channel_form::draw;
