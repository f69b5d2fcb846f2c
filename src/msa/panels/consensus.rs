use super::{new_panel, PanelContext, MIN_LETTER_CELL};
use crate::msa::color::Color;
use crate::msa::request::PanelKind;
use panelplot::{Anchor, Mark, Panel};

// Vertical room kept above the tallest bar for its consensus letter
const LETTER_BAND: f64 = 14.0;
const BAR_FILL: f64 = 0.8;

pub fn draw(ctx: &PanelContext, show_letters: Option<bool>) -> Panel {
    let region = ctx.region;
    let mut panel = new_panel(region, PanelKind::Consensus);

    let col_width = region.col_width;
    let show_letters = show_letters.unwrap_or(col_width >= MIN_LETTER_CELL);
    let letter_band = if show_letters { LETTER_BAND } else { 0.0 };
    let bar_area = (region.height - letter_band).max(0.0);
    let letter_size = (col_width * 0.8).min(LETTER_BAND - 2.0);

    for col in region.window.columns() {
        let Some((symbol, freq)) = ctx.alignment.profile(col).consensus() else {
            continue;
        };
        let rgba = ctx.colors.get(symbol);
        let color = rgba.to_hex();
        let bar_height = freq * bar_area;
        let x = region.col_x(col);
        let y = region.height - bar_height;
        let bar = Mark::rect(
            x + col_width * (1.0 - BAR_FILL) / 2.0,
            y,
            col_width * BAR_FILL,
            bar_height,
            color.clone(),
        );
        panel.push(bar.with_opacity(rgba.a));
        if show_letters {
            let letter = Mark::text(
                x + col_width / 2.0,
                y - 3.0,
                (symbol as char).to_string(),
                letter_size,
                Anchor::Middle,
            );
            panel.push(letter.with_color(color).with_opacity(rgba.a));
        }
    }

    panel.push(Mark::line(
        0.0,
        region.height,
        region.width,
        0.0,
        Color::Black.to_string(),
    ));

    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::color::resolve;
    use crate::msa::panels::test_region;
    use crate::msa::Alignment;
    use panelplot::Shape;

    #[test]
    fn bar_height_tracks_consensus_frequency() {
        let alignment = Alignment::new(&["ATGCATGC", "ATG-ATGC", "ATGCATGC"], None).unwrap();
        let colors = resolve(&alignment, None);
        let region = test_region(0, 8, 100.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let panel = draw(&ctx, Some(false));
        let heights = panel
            .marks
            .iter()
            .filter_map(|m| match m.shape {
                Shape::Rect { height, .. } => Some(height),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(heights.len(), 8);
        assert!((heights[0] - 100.0).abs() < 1e-9);
        assert!((heights[3] - 100.0 * 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn bars_and_letters_use_shared_colors() {
        let alignment = Alignment::new(&["AC", "AC"], None).unwrap();
        let colors = resolve(&alignment, None);
        let region = test_region(0, 2, 100.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let panel = draw(&ctx, Some(true));
        let a_marks = panel
            .marks
            .iter()
            .filter(|m| m.color == colors.hex(b'A'))
            .count();
        assert_eq!(a_marks, 2);
    }

    #[test]
    fn all_gap_column_has_no_bar() {
        let alignment = Alignment::new(&["A-", "A-"], None).unwrap();
        let colors = resolve(&alignment, None);
        let region = test_region(0, 2, 100.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let panel = draw(&ctx, Some(false));
        let bars = panel
            .marks
            .iter()
            .filter(|m| matches!(m.shape, Shape::Rect { .. }))
            .count();
        assert_eq!(bars, 1);
    }
}
