//! Colour model shared by entity renderers and backends.
//!
//! All colours are linear premultiplied RGBA; backends blend with
//! `One, OneMinusSrcAlpha`.

pub mod color;
pub mod palette;

pub use color::Color;
