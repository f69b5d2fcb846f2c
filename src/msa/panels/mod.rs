mod annotation;
mod block;
mod consensus;
mod logo;

use super::alignment::Alignment;
use super::color::ColorMap;
use super::layout::Region;
use super::request::{PanelKind, PanelSpec};
use panelplot::Panel;

// Cells narrower than this are drawn without residue letters
const MIN_LETTER_CELL: f64 = 6.0;
const AXIS_HEIGHT: f64 = 14.0;
const TICK_FONT_SIZE: f64 = 9.0;

/// Everything a drawing routine needs besides its own overrides
pub struct PanelContext<'a> {
    pub alignment: &'a Alignment,
    pub colors: &'a ColorMap,
    pub region: &'a Region,
}

pub fn draw_panel(spec: &PanelSpec, ctx: &PanelContext) -> Panel {
    match spec {
        PanelSpec::Alignment {
            show_letters,
            show_names,
            font_size,
        } => block::draw(ctx, *show_letters, *show_names, *font_size),
        PanelSpec::Consensus { show_letters } => consensus::draw(ctx, *show_letters),
        PanelSpec::Logo { mode } => logo::draw(ctx, *mode),
        PanelSpec::Annotation {
            annotations,
            font_size,
        } => annotation::draw(ctx, annotations, *font_size),
    }
}

fn new_panel(region: &Region, kind: PanelKind) -> Panel {
    Panel::new(
        kind.to_string(),
        region.x,
        region.y,
        region.width,
        region.height,
    )
}

fn axis_height(region: &Region) -> f64 {
    if region.height > 3.0 * AXIS_HEIGHT {
        AXIS_HEIGHT
    } else {
        0.0
    }
}

fn get_tick_spacing(num_cols: usize) -> usize {
    match num_cols {
        0..=20 => 1,
        21..=50 => 5,
        51..=100 => 10,
        101..=200 => 20,
        201..=500 => 50,
        501..=1000 => 100,
        1001..=2500 => 250,
        _ => 500,
    }
}

#[cfg(test)]
pub(super) fn test_region(start: usize, end: usize, height: f64) -> Region {
    Region {
        panel_index: 0,
        x: 50.0,
        y: 10.0,
        width: (end - start) as f64 * 20.0,
        height,
        window: super::window::SeqWindow { start, end },
        col_width: 20.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_spacing_grows_with_width() {
        assert_eq!(get_tick_spacing(8), 1);
        assert_eq!(get_tick_spacing(50), 5);
        assert_eq!(get_tick_spacing(300), 50);
        assert_eq!(get_tick_spacing(10_000), 500);
    }
}
