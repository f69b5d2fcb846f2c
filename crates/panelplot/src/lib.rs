/*!
This crate provides a small drawing surface for figures made of horizontal
panels stacked on top of each other. Each panel is a rectangular region holding
marks (filled rectangles, lines, text labels, and glyphs stretched to fill a
box) positioned relative to the panel's origin. Figures are rendered to SVG
text and then rasterized to PNG or converted to PDF, entirely in memory.

Every render owns its surface: nothing is drawn into process-wide state, so
independent figures can be rendered concurrently.
*/

mod common;
mod figure;
mod image;
mod pdf;
mod png;
mod svg;

pub use common::{prepare_svg_tree, DEFAULT_FONT_FAMILY};
pub use figure::{Anchor, Color, Figure, Mark, Panel, Shape};
pub use image::{generate as generate_image, render as render_image, ImageFormat};
pub use svg::generate_string as generate_svg;
