use super::color::{self, ColorMap};
use super::error::{MsaPlotError, MsaResult};
use super::layout;
use super::panels::{draw_panel, PanelContext};
use super::payload::ImagePayload;
use super::request::{FigureSpec, PlotRequest};
use itertools::Itertools;
use panelplot::{render_image, Figure, ImageFormat, Panel};
use rayon::prelude::*;

/// Encoded figure plus its content type
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
}

impl RenderedImage {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

/// Lays out and draws every panel of the figure against one shared color map.
///
/// Each (line group, panel) region is drawn independently, in parallel, and
/// the results are stacked in layout order. The returned color map is the one
/// every panel used.
pub fn build_figure(spec: &FigureSpec) -> (Figure, ColorMap) {
    let colors = color::resolve(&spec.alignment, spec.color_map.as_ref());
    let layout = layout::plan(spec);
    let regions = layout.regions().collect_vec();

    let panels: Vec<Panel> = regions
        .par_iter()
        .map(|region| {
            let ctx = PanelContext {
                alignment: &spec.alignment,
                colors: &colors,
                region,
            };
            draw_panel(&spec.panels[region.panel_index], &ctx)
        })
        .collect();

    let mut figure = Figure::new(layout.width, layout.height);
    figure.panels = panels;
    (figure, colors)
}

pub fn compose(spec: &FigureSpec) -> MsaResult<RenderedImage> {
    compose_as(spec, ImageFormat::Png)
}

pub fn compose_as(spec: &FigureSpec, format: ImageFormat) -> MsaResult<RenderedImage> {
    let (figure, colors) = build_figure(spec);
    log::debug!(
        "Rendering {} panel region(s) with {} color map ({} symbols)",
        figure.panels.len(),
        match colors.origin() {
            color::ColorMapOrigin::Explicit => "explicit",
            color::ColorMapOrigin::Derived => "derived",
        },
        colors.len()
    );
    let data = render_image(&figure, format).map_err(MsaPlotError::Render)?;
    Ok(RenderedImage { data, format })
}

/// Validates a request, renders it to PNG and wraps the bytes for the host UI.
pub fn render_request(request: PlotRequest) -> MsaResult<ImagePayload> {
    let spec = FigureSpec::new(request)?;
    let image = compose(&spec)?;
    Ok(ImagePayload::from_image(&image))
}
