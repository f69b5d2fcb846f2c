use super::{new_panel, PanelContext};
use crate::msa::annotation::{pack_lanes, Annotation};
use crate::msa::color::Rgba;
use crate::msa::request::PanelKind;
use panelplot::{Anchor, Mark, Panel};

const MAX_LANE_HEIGHT: f64 = 28.0;
const MAX_LABEL_SIZE: f64 = 12.0;

pub fn draw(ctx: &PanelContext, annotations: &[Annotation], font_size: Option<f64>) -> Panel {
    let region = ctx.region;
    let mut panel = new_panel(region, PanelKind::Annotation);

    // Lanes come from the full list so they stay put across wrapped line groups
    let lanes = pack_lanes(annotations);
    let num_lanes = lanes.iter().max().map_or(1, |lane| lane + 1);
    let lane_height = (region.height / num_lanes as f64).min(MAX_LANE_HEIGHT);
    let bar_height = lane_height * 0.7;
    let label_size = font_size.unwrap_or((bar_height * 0.6).min(MAX_LABEL_SIZE));

    let mut drawn = 0;
    for (index, annotation) in annotations.iter().enumerate() {
        let Some((start, end)) = region.window.intersect(annotation.start, annotation.end) else {
            continue;
        };
        let x = region.col_x(start);
        let width = (end - start) as f64 * region.col_width;
        let y = lanes[index] as f64 * lane_height + (lane_height - bar_height) / 2.0;
        let fill = annotation.fill(index);

        panel.push(Mark::rect(x, y, width, bar_height, fill.clone()));
        let text_color = Rgba::from_hex(&fill)
            .map(|color| color.contrast().to_string())
            .unwrap_or_else(|| "#000000".to_string());
        let label = Mark::text(
            x + width / 2.0,
            y + bar_height / 2.0 + label_size * 0.35,
            annotation.label.as_str(),
            label_size,
            Anchor::Middle,
        );
        panel.push(label.with_color(text_color));
        drawn += 1;
    }

    log::debug!(
        "Annotation track columns {}-{}: {} of {} intervals visible",
        region.window.start,
        region.window.end,
        drawn,
        annotations.len()
    );
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::color::resolve;
    use crate::msa::panels::test_region;
    use crate::msa::Alignment;
    use panelplot::Shape;

    fn bars(panel: &Panel) -> Vec<(f64, f64, f64)> {
        panel
            .marks
            .iter()
            .filter_map(|m| match m.shape {
                Shape::Rect { width, .. } => Some((m.x, m.y, width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn intervals_are_clipped_to_window() {
        let alignment = Alignment::new(&["ATGCATGC"], None).unwrap();
        let colors = resolve(&alignment, None);
        let region = test_region(2, 6, 40.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let annotations = vec![
            Annotation::new(0, 4, "left", None).unwrap(),
            Annotation::new(6, 8, "outside", None).unwrap(),
        ];
        let panel = draw(&ctx, &annotations, None);
        let bars = bars(&panel);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].0, 0.0);
        assert_eq!(bars[0].2, 40.0);
    }

    #[test]
    fn overlapping_intervals_use_separate_lanes() {
        let alignment = Alignment::new(&["ATGCATGC"], None).unwrap();
        let colors = resolve(&alignment, None);
        let region = test_region(0, 8, 40.0);
        let ctx = PanelContext {
            alignment: &alignment,
            colors: &colors,
            region: &region,
        };
        let annotations = vec![
            Annotation::new(0, 4, "a", None).unwrap(),
            Annotation::new(2, 6, "b", Some("#FF0000".to_string())).unwrap(),
        ];
        let panel = draw(&ctx, &annotations, Some(8.0));
        let bars = bars(&panel);
        assert_eq!(bars.len(), 2);
        assert!(bars[1].1 > bars[0].1);
        assert!(panel.marks.iter().any(|m| m.color == "#FF0000"));
    }
}
