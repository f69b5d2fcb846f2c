use super::color::{Color, Rgba};
use super::error::{MsaPlotError, MsaResult};
use serde::Deserialize;

const ANNOTATION_COLORS: [Color; 6] = [
    Color::Teal,
    Color::Purple,
    Color::Orange,
    Color::PaleBlue,
    Color::Pink,
    Color::Khaki,
];

/// Labeled half-open interval of alignment columns
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AnnotationRecord")]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub color: Option<String>,
}

// Records arrive as `[start, end, label]`, `[start, end, label, color]`, or objects
#[derive(Deserialize)]
#[serde(untagged)]
enum AnnotationRecord {
    Colored(usize, usize, String, String),
    Plain(usize, usize, String),
    Object {
        start: usize,
        end: usize,
        label: String,
        #[serde(default)]
        color: Option<String>,
    },
}

impl TryFrom<AnnotationRecord> for Annotation {
    type Error = MsaPlotError;

    fn try_from(record: AnnotationRecord) -> MsaResult<Self> {
        match record {
            AnnotationRecord::Colored(start, end, label, color) => {
                Annotation::new(start, end, label, Some(color))
            }
            AnnotationRecord::Plain(start, end, label) => Annotation::new(start, end, label, None),
            AnnotationRecord::Object {
                start,
                end,
                label,
                color,
            } => Annotation::new(start, end, label, color),
        }
    }
}

impl Annotation {
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        color: Option<String>,
    ) -> MsaResult<Self> {
        if start >= end {
            return Err(MsaPlotError::Validation(format!(
                "invalid annotation interval: start {} >= end {}",
                start, end
            )));
        }
        if let Some(color) = &color {
            if Rgba::from_hex(color).is_none() {
                return Err(MsaPlotError::Validation(format!(
                    "annotation color must be #RRGGBB, got {:?}",
                    color
                )));
            }
        }
        Ok(Self {
            start,
            end,
            label: label.into(),
            color,
        })
    }

    /// Explicit color, or the palette entry for this record's position in its list
    pub fn fill(&self, index: usize) -> String {
        match &self.color {
            Some(color) => color.to_uppercase(),
            None => ANNOTATION_COLORS[index % ANNOTATION_COLORS.len()].to_string(),
        }
    }
}

/// Assigns each annotation the lowest lane with no overlapping interval.
pub fn pack_lanes(annotations: &[Annotation]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..annotations.len()).collect();
    order.sort_by_key(|&i| (annotations[i].start, annotations[i].end));

    let mut lane_ends: Vec<usize> = Vec::new();
    let mut lanes = vec![0; annotations.len()];
    for index in order {
        let annotation = &annotations[index];
        let lane = match lane_ends.iter().position(|&end| end <= annotation.start) {
            Some(lane) => lane,
            None => {
                lane_ends.push(0);
                lane_ends.len() - 1
            }
        };
        lane_ends[lane] = annotation.end;
        lanes[index] = lane;
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_array_records() {
        let json = r##"[[0, 4, "domain"], [4, 8, "loop", "#FF0000"]]"##;
        let annotations: Vec<Annotation> = serde_json::from_str(json).unwrap();
        assert_eq!(
            annotations,
            vec![
                Annotation::new(0, 4, "domain", None).unwrap(),
                Annotation::new(4, 8, "loop", Some("#FF0000".to_string())).unwrap(),
            ]
        );
    }

    #[test]
    fn deserialize_object_record() {
        let json = r#"{"start": 1, "end": 3, "label": "site"}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation, Annotation::new(1, 3, "site", None).unwrap());
    }

    #[test]
    fn deserialize_rejects_empty_interval() {
        let json = r#"[5, 5, "empty"]"#;
        assert!(serde_json::from_str::<Annotation>(json).is_err());
    }

    #[test]
    fn invalid_color_err() {
        assert!(Annotation::new(0, 1, "x", Some("red".to_string())).is_err());
    }

    #[test]
    fn fill_cycles_palette_without_color() {
        let annotation = Annotation::new(0, 1, "x", None).unwrap();
        assert_eq!(annotation.fill(0), Color::Teal.to_string());
        assert_eq!(annotation.fill(6), Color::Teal.to_string());
        let colored = Annotation::new(0, 1, "x", Some("#abcdef".to_string())).unwrap();
        assert_eq!(colored.fill(0), "#ABCDEF");
    }

    #[test]
    fn overlapping_annotations_get_separate_lanes() {
        let annotations = vec![
            Annotation::new(0, 4, "a", None).unwrap(),
            Annotation::new(2, 6, "b", None).unwrap(),
            Annotation::new(4, 8, "c", None).unwrap(),
        ];
        assert_eq!(pack_lanes(&annotations), vec![0, 1, 0]);
    }
}
