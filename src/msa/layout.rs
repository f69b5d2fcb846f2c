use super::request::{FigureSpec, PanelSpec};
use super::window::SeqWindow;

pub const DPI: f64 = 100.0;
pub const DEFAULT_FIGSIZE: (f64, f64) = (10.0, 5.0);
pub const NAME_FONT_SIZE: f64 = 11.0;

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 16.0;
const PANEL_SPACING: f64 = 8.0;
const GROUP_SPACING: f64 = 24.0;

/// Area of the figure assigned to one panel within one line group
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub panel_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub window: SeqWindow,
    pub col_width: f64,
}

impl Region {
    /// Left edge of an alignment column, relative to the region
    pub fn col_x(&self, col: usize) -> f64 {
        (col - self.window.start) as f64 * self.col_width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGroup {
    pub window: SeqWindow,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<LineGroup>,
}

impl Layout {
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.groups.iter().flat_map(|group| group.regions.iter())
    }
}

pub fn plan(spec: &FigureSpec) -> Layout {
    let chunks = spec.window.chunks(spec.wrap);
    let num_groups = chunks.len();
    let (width_in, height_in) = spec
        .figure_size
        .unwrap_or((DEFAULT_FIGSIZE.0, DEFAULT_FIGSIZE.1 * num_groups as f64));
    let width = width_in * DPI;
    let height = height_in * DPI;

    let left = MARGIN_LEFT + name_margin(spec);
    let plot_width = (width - left - MARGIN_RIGHT).max(1.0);
    let columns_per_line = spec
        .wrap
        .unwrap_or(spec.window.len())
        .min(spec.window.len());
    let col_width = plot_width / columns_per_line as f64;

    let group_spacing = GROUP_SPACING * (num_groups - 1) as f64;
    let group_height =
        ((height - MARGIN_TOP - MARGIN_BOTTOM - group_spacing) / num_groups as f64).max(1.0);

    let num_panels = spec.panels.len();
    let panel_spacing = PANEL_SPACING * (num_panels - 1) as f64;
    let panel_area = (group_height - panel_spacing).max(num_panels as f64);
    let total_ratio: f64 = spec.height_ratios.iter().sum();

    let mut groups = Vec::with_capacity(num_groups);
    let mut group_y = MARGIN_TOP;
    for window in chunks {
        let mut regions = Vec::with_capacity(num_panels);
        let mut y = group_y;
        for (panel_index, ratio) in spec.height_ratios.iter().enumerate() {
            let region_height = panel_area * ratio / total_ratio;
            regions.push(Region {
                panel_index,
                x: left,
                y,
                width: window.len() as f64 * col_width,
                height: region_height,
                window,
                col_width,
            });
            y += region_height + PANEL_SPACING;
        }
        groups.push(LineGroup { window, regions });
        group_y += group_height + GROUP_SPACING;
    }

    log::debug!(
        "Layout {}x{} px, {} line group(s), {} panel(s) each, column width {:.2} px",
        width,
        height,
        num_groups,
        num_panels,
        col_width
    );

    Layout {
        width,
        height,
        groups,
    }
}

// Room for sequence names when an alignment block shows them
fn name_margin(spec: &FigureSpec) -> f64 {
    let Some(names) = spec.alignment.names() else {
        return 0.0;
    };
    let shows_names = spec.panels.iter().any(|panel| {
        matches!(
            panel,
            PanelSpec::Alignment {
                show_names: None | Some(true),
                ..
            }
        )
    });
    if !shows_names {
        return 0.0;
    }
    let longest = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);
    longest as f64 * NAME_FONT_SIZE * 0.6 + 8.0
}
