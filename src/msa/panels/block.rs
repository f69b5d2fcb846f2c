use super::{
    axis_height, get_tick_spacing, new_panel, PanelContext, MIN_LETTER_CELL, TICK_FONT_SIZE,
};
use crate::msa::color::Color;
use crate::msa::layout::NAME_FONT_SIZE;
use crate::msa::request::PanelKind;
use panelplot::{Anchor, Mark, Panel};

pub fn draw(
    ctx: &PanelContext,
    show_letters: Option<bool>,
    show_names: Option<bool>,
    font_size: Option<f64>,
) -> Panel {
    let region = ctx.region;
    let mut panel = new_panel(region, PanelKind::Alignment);

    let axis = axis_height(region);
    let row_height = (region.height - axis) / ctx.alignment.num_rows() as f64;
    let col_width = region.col_width;
    let show_letters = show_letters
        .unwrap_or(col_width >= MIN_LETTER_CELL && row_height >= MIN_LETTER_CELL);
    let letter_size = font_size.unwrap_or(col_width.min(row_height) * 0.75);

    for (row_index, row) in ctx.alignment.rows().iter().enumerate() {
        let y = row_index as f64 * row_height;
        for col in region.window.columns() {
            let symbol = row[col];
            let color = ctx.colors.get(symbol);
            let x = region.col_x(col);
            let cell = Mark::rect(x, y, col_width, row_height, color.to_hex());
            panel.push(cell.with_opacity(color.a));
            if show_letters {
                let letter = Mark::text(
                    x + col_width / 2.0,
                    y + row_height / 2.0 + letter_size * 0.35,
                    (symbol as char).to_string(),
                    letter_size,
                    Anchor::Middle,
                );
                panel.push(letter.with_color(color.contrast().to_string()));
            }
        }
    }

    if let (true, Some(names)) = (show_names.unwrap_or(true), ctx.alignment.names()) {
        let size = font_size.unwrap_or(NAME_FONT_SIZE).min(row_height * 0.9);
        for (row_index, name) in names.iter().enumerate() {
            let y = row_index as f64 * row_height + row_height / 2.0 + size * 0.35;
            panel.push(Mark::text(-6.0, y, name.as_str(), size, Anchor::End));
        }
    }

    if axis > 0.0 {
        add_ticks(&mut panel, ctx, region.height - axis);
    }

    panel
}

// Column positions are labeled 1-based, counted from the start of the full alignment
fn add_ticks(panel: &mut Panel, ctx: &PanelContext, y: f64) {
    let region = ctx.region;
    let spacing = get_tick_spacing(region.window.len());
    for col in region.window.columns().filter(|col| (col + 1) % spacing == 0) {
        let x = region.col_x(col) + region.col_width / 2.0;
        panel.push(Mark::line(x, y, 0.0, 3.0, Color::Black.to_string()));
        panel.push(Mark::text(
            x,
            y + 3.0 + TICK_FONT_SIZE,
            (col + 1).to_string(),
            TICK_FONT_SIZE,
            Anchor::Middle,
        ));
    }
}
