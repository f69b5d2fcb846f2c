use super::{new_panel, PanelContext, TICK_FONT_SIZE};
use crate::msa::alignment::{Alphabet, ColumnProfile};
use crate::msa::color::Color;
use crate::msa::request::{LogoMode, PanelKind};
use itertools::Itertools;
use panelplot::{Anchor, Mark, Panel};

const GLYPH_FILL: f64 = 0.9;

pub fn draw(ctx: &PanelContext, mode: LogoMode) -> Panel {
    let region = ctx.region;
    let mut panel = new_panel(region, PanelKind::Logo);

    let alphabet = ctx.alignment.alphabet();
    let y_max = match mode {
        LogoMode::Bits => alphabet.max_bits(),
        LogoMode::Probability => 1.0,
    };
    let col_width = region.col_width;

    for col in region.window.columns() {
        let profile = ctx.alignment.profile(col);
        let mut y = region.height;
        for (symbol, value) in stack_heights(&profile, alphabet, mode) {
            let height = value / y_max * region.height;
            y -= height;
            let color = ctx.colors.get(symbol);
            let glyph = Mark::glyph(
                region.col_x(col) + col_width * (1.0 - GLYPH_FILL) / 2.0,
                y,
                symbol as char,
                col_width * GLYPH_FILL,
                height,
                color.to_hex(),
            );
            panel.push(glyph.with_opacity(color.a));
        }
    }

    add_axis(&mut panel, y_max, mode);
    panel
}

/// Glyph heights of one column in axis units, smallest first so the most
/// frequent residue ends up on top of the stack.
pub fn stack_heights(profile: &ColumnProfile, alphabet: Alphabet, mode: LogoMode) -> Vec<(u8, f64)> {
    let heights = match mode {
        LogoMode::Bits => {
            let bits = profile.information_content(alphabet);
            profile
                .frequencies()
                .into_iter()
                .map(|(symbol, freq)| (symbol, freq * bits))
                .collect_vec()
        }
        LogoMode::Probability => profile
            .counts
            .iter()
            .map(|(symbol, count)| (*symbol, *count as f64 / profile.depth as f64))
            .collect_vec(),
    };
    heights
        .into_iter()
        .filter(|(_, height)| *height > 0.0)
        .sorted_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
        .collect_vec()
}

fn add_axis(panel: &mut Panel, y_max: f64, mode: LogoMode) {
    let height = panel.height;
    let black = Color::Black.to_string();
    panel.push(Mark::line(-4.0, 0.0, 0.0, height, black.clone()));
    panel.push(Mark::line(0.0, height, panel.width, 0.0, black));

    let unit = match mode {
        LogoMode::Bits => "bits",
        LogoMode::Probability => "prob",
    };
    panel.push(Mark::text(
        -6.0,
        height,
        "0",
        TICK_FONT_SIZE,
        Anchor::End,
    ));
    panel.push(Mark::text(
        -6.0,
        TICK_FONT_SIZE,
        format!("{:.1}", y_max),
        TICK_FONT_SIZE,
        Anchor::End,
    ));
    panel.push(Mark::text(
        -6.0,
        height / 2.0 + TICK_FONT_SIZE / 2.0,
        unit,
        TICK_FONT_SIZE,
        Anchor::End,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::color::resolve;
    use crate::msa::panels::test_region;
    use crate::msa::Alignment;
    use panelplot::Shape;

    fn example() -> Alignment {
        Alignment::new(&["ATGCATGC", "ATG-ATGC", "ATGCATGC"], None).unwrap()
    }

    #[test]
    fn conserved_column_fills_bits_axis() {
        let alignment = example();
        let stack = stack_heights(&alignment.profile(0), Alphabet::Nucleotide, LogoMode::Bits);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].0, b'A');
        assert!((stack[0].1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn most_frequent_residue_on_top() {
        let alignment = Alignment::new(&["A", "A", "A", "C"], None).unwrap();
        let stack = stack_heights(
            &alignment.profile(0),
            Alphabet::Nucleotide,
            LogoMode::Probability,
        );
        assert_eq!(stack, vec![(b'C', 0.25), (b'A', 0.75)]);
    }

    #[test]
    fn uniform_column_carries_no_information() {
        let alignment = Alignment::new(&["A", "C", "G", "T"], None).unwrap();
        let stack = stack_heights(&alignment.profile(0), Alphabet::Nucleotide, LogoMode::Bits);
        assert!(stack.is_empty());
    }

    #[test]
    fn glyphs_use_shared_colors() {
        let alignment = example();
        let colors = resolve(&alignment, None);
        let region = test_region(0, 8, 100.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let panel = draw(&ctx, LogoMode::Bits);
        let glyphs = panel
            .marks
            .iter()
            .filter_map(|m| match m.shape {
                Shape::Glyph { symbol, height, .. } => Some((symbol, height, m.color.clone())),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(glyphs.len(), 8);
        for (symbol, _, color) in &glyphs {
            assert_eq!(*color, colors.hex(*symbol as u8));
        }
        assert!((glyphs[0].1 - 100.0).abs() < 1e-9);
        assert!(glyphs[3].1 < glyphs[0].1);
    }
}
