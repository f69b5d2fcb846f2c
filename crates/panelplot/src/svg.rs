use crate::figure::{Anchor, Color, Figure, Mark, Panel, Shape};

// Glyphs are laid out at this font size and then scaled to their box
const GLYPH_FONT_SIZE: f64 = 100.0;
// Approximate advance width and cap height of a bold monospace glyph, in ems
const GLYPH_ADVANCE: f64 = 0.6;
const GLYPH_CAP_HEIGHT: f64 = 0.72;

pub fn generate_string(figure: &Figure) -> String {
    let mut generator = Generator::new(&figure.font_family);
    generator.generate(figure);
    generator.out
}

struct Generator {
    font_family: String,
    out: String,
}

impl Generator {
    fn new(font_family: &str) -> Self {
        Self {
            font_family: escape(font_family),
            out: String::new(),
        }
    }

    fn generate(&mut self, figure: &Figure) {
        self.start_svg(figure.width, figure.height);
        self.add_background();

        for panel in &figure.panels {
            self.plot_panel(panel);
            if panel.outline {
                self.plot_outline(panel);
            }
        }

        self.end_svg();
    }

    fn plot_panel(&mut self, panel: &Panel) {
        // Lines and text go on top of filled shapes
        for mark in panel.marks.iter().filter(|m| is_fill(m)) {
            self.plot_mark(panel, mark);
        }
        for mark in panel.marks.iter().filter(|m| !is_fill(m)) {
            self.plot_mark(panel, mark);
        }
    }

    fn plot_mark(&mut self, panel: &Panel, mark: &Mark) {
        let pos = (panel.xpos + mark.x, panel.ypos + mark.y);
        match &mark.shape {
            Shape::Rect {
                width,
                height,
                opacity,
            } => self.add_rect(pos, (*width, *height), &mark.color, *opacity),
            Shape::Line { dx, dy, stroke } => {
                self.add_line(pos, (pos.0 + dx, pos.1 + dy), &mark.color, *stroke)
            }
            Shape::Text {
                content,
                size,
                anchor,
                bold,
                opacity,
            } => {
                let font = (*size, *anchor, *bold);
                self.add_text(pos, content, font, &mark.color, *opacity)
            }
            Shape::Glyph {
                symbol,
                width,
                height,
                opacity,
            } => self.add_glyph(pos, (*width, *height), *symbol, &mark.color, *opacity),
        }
    }

    fn plot_outline(&mut self, panel: &Panel) {
        let dimensions = format!("width=\"{}\" height=\"{}\"", panel.width, panel.height);
        let pos = format!("x=\"{}\" y=\"{}\"", panel.xpos, panel.ypos);
        let style = r##"stroke="#000000" stroke-width="1" fill="none""##;
        self.out
            .push_str(&format!("<rect {} {} {} />\n", dimensions, pos, style));
    }

    fn add_rect(&mut self, pos: (f64, f64), dims: (f64, f64), color: &Color, opacity: f64) {
        let (x, y) = pos;
        let (w, h) = dims;
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        let pos = format!("x=\"{}\" y=\"{}\"", x, y);
        let dim = format!("height=\"{}\" width=\"{}\"", h, w);
        let style = format!("fill=\"{}\" stroke=\"{}\" stroke-width=\"0\"", color, color);
        let rect = format!("<rect {} {} {} opacity=\"{}\" />\n", pos, dim, style, opacity);
        self.out.push_str(&rect);
    }

    fn add_line(&mut self, from: (f64, f64), to: (f64, f64), color: &Color, stroke: f64) {
        let x1y1 = format!("x1=\"{}\" y1=\"{}\"", from.0, from.1);
        let x2y2 = format!("x2=\"{}\" y2=\"{}\"", to.0, to.1);
        let style = format!("stroke=\"{}\" stroke-width=\"{}\"", color, stroke);
        self.out
            .push_str(&format!("<line {} {} {} />\n", x1y1, x2y2, style));
    }

    fn add_text(
        &mut self,
        pos: (f64, f64),
        content: &str,
        font: (f64, Anchor, bool),
        color: &Color,
        opacity: f64,
    ) {
        let (size, anchor, bold) = font;
        let point = format!("x=\"{}\" y=\"{}\"", pos.0, pos.1);
        let weight = if bold { "bold" } else { "normal" };
        let style = format!(
            "font-family=\"{}\" font-weight=\"{}\" font-size=\"{}px\" text-anchor=\"{}\" fill=\"{}\" fill-opacity=\"{}\"",
            self.font_family,
            weight,
            size,
            anchor.as_svg(),
            color,
            opacity
        );
        let line = format!("<text {} {}>{}</text>\n", point, style, escape(content));
        self.out.push_str(&line);
    }

    fn add_glyph(
        &mut self,
        pos: (f64, f64),
        dims: (f64, f64),
        symbol: char,
        color: &Color,
        opacity: f64,
    ) {
        let (w, h) = dims;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let center_x = pos.0 + w / 2.0;
        let baseline = pos.1 + h;
        let scale_x = w / (GLYPH_FONT_SIZE * GLYPH_ADVANCE);
        let scale_y = h / (GLYPH_FONT_SIZE * GLYPH_CAP_HEIGHT);

        let transform = format!(
            "transform=\"translate({} {}) scale({} {})\"",
            center_x, baseline, scale_x, scale_y
        );
        let style = format!(
            "font-family=\"{}\" font-weight=\"bold\" font-size=\"{}px\" text-anchor=\"middle\" fill=\"{}\" fill-opacity=\"{}\"",
            self.font_family, GLYPH_FONT_SIZE, color, opacity
        );
        let line = format!(
            "<text x=\"0\" y=\"0\" {} {}>{}</text>\n",
            transform,
            style,
            escape(&symbol.to_string())
        );
        self.out.push_str(&line);
    }

    fn start_svg(&mut self, width: f64, height: f64) {
        self.out.push_str("<?xml version=\"1.0\"?>\n");
        self.out.push_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
        );
        self.out.push_str(&format!(
            "width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            width, height, width, height
        ));
    }

    fn end_svg(&mut self) {
        self.out.push_str("</svg>\n");
    }

    fn add_background(&mut self) {
        self.out
            .push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    }
}

fn is_fill(mark: &Mark) -> bool {
    matches!(mark.shape, Shape::Rect { .. })
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
