mod alignment;
mod annotation;
pub mod color;
mod compose;
mod error;
pub mod layout;
mod panels;
mod payload;
mod request;
mod window;

pub use alignment::{is_gap, Alignment, Alphabet, ColumnProfile};
pub use annotation::Annotation;
pub use color::{resolve as resolve_colors, ColorMap, ColorMapOrigin, Rgba};
pub use compose::{build_figure, compose, compose_as, render_request, RenderedImage};
pub use error::{MsaPlotError, MsaResult};
pub use payload::ImagePayload;
pub use request::{
    FigureSpec, LogoMode, PanelKind, PanelParams, PanelSpec, PlotRequest, PlotType,
};
pub use window::SeqWindow;
