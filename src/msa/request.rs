use super::alignment::Alignment;
use super::annotation::Annotation;
use super::color::ColorMap;
use super::error::{MsaPlotError, MsaResult};
use super::window::SeqWindow;
use serde::Deserialize;
use std::{collections::BTreeMap, fmt, io::Read, str::FromStr};

/// Request as sent by the hosting UI component
#[derive(Debug, Clone, Deserialize)]
pub struct PlotRequest {
    pub msa: Vec<String>,
    pub seq_names: Option<Vec<String>>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub color_map: Option<BTreeMap<String, Vec<f64>>>,
    #[serde(default = "default_plot_type")]
    pub plot_type: String,
    #[serde(default = "default_panels")]
    pub panels: Vec<String>,
    pub panel_height_ratios: Option<Vec<f64>>,
    pub panel_params: Option<Vec<PanelParams>>,
    pub wrap: Option<usize>,
    pub figsize: Option<Vec<f64>>,
    pub annotations: Option<Vec<Annotation>>,
}

fn default_plot_type() -> String {
    "msa".to_string()
}

fn default_panels() -> Vec<String> {
    vec!["msa".to_string()]
}

impl PlotRequest {
    pub fn new(msa: Vec<String>) -> Self {
        Self {
            msa,
            seq_names: None,
            start: None,
            end: None,
            color_map: None,
            plot_type: default_plot_type(),
            panels: default_panels(),
            panel_height_ratios: None,
            panel_params: None,
            wrap: None,
            figsize: None,
            annotations: None,
        }
    }

    pub fn from_json(json: &str) -> MsaResult<Self> {
        serde_json::from_str(json).map_err(|e| MsaPlotError::Validation(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> MsaResult<Self> {
        serde_json::from_reader(reader).map_err(|e| MsaPlotError::Validation(e.to_string()))
    }
}

/// Per-panel overrides; keys that no panel understands are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelParams {
    pub show_letters: Option<bool>,
    pub show_names: Option<bool>,
    pub font_size: Option<f64>,
    pub logo_mode: Option<LogoMode>,
    pub annotations: Option<Vec<Annotation>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoMode {
    #[default]
    Bits,
    Probability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    Msa,
    Consensus,
    Logo,
    Annotation,
    Complex,
}

impl FromStr for PlotType {
    type Err = MsaPlotError;
    fn from_str(plot_type: &str) -> MsaResult<Self> {
        match plot_type {
            "msa" => Ok(PlotType::Msa),
            "consensus" => Ok(PlotType::Consensus),
            "logo" => Ok(PlotType::Logo),
            "annotation" => Ok(PlotType::Annotation),
            "complex" => Ok(PlotType::Complex),
            _ => Err(MsaPlotError::UnknownPlotType(plot_type.to_string())),
        }
    }
}

impl PlotType {
    /// Panel drawn by a single-panel plot type
    pub fn single_panel(&self) -> Option<PanelKind> {
        match self {
            PlotType::Msa => Some(PanelKind::Alignment),
            PlotType::Consensus => Some(PanelKind::Consensus),
            PlotType::Logo => Some(PanelKind::Logo),
            PlotType::Annotation => Some(PanelKind::Annotation),
            PlotType::Complex => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Alignment,
    Consensus,
    Logo,
    Annotation,
}

impl FromStr for PanelKind {
    type Err = MsaPlotError;
    fn from_str(kind: &str) -> MsaResult<Self> {
        match kind {
            "msa" => Ok(PanelKind::Alignment),
            "consensus" => Ok(PanelKind::Consensus),
            "logo" => Ok(PanelKind::Logo),
            "annotation" => Ok(PanelKind::Annotation),
            _ => Err(MsaPlotError::UnknownPanelKind(kind.to_string())),
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PanelKind::Alignment => "msa",
            PanelKind::Consensus => "consensus",
            PanelKind::Logo => "logo",
            PanelKind::Annotation => "annotation",
        };
        write!(formatter, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelSpec {
    Alignment {
        show_letters: Option<bool>,
        show_names: Option<bool>,
        font_size: Option<f64>,
    },
    Consensus {
        show_letters: Option<bool>,
    },
    Logo {
        mode: LogoMode,
    },
    Annotation {
        annotations: Vec<Annotation>,
        font_size: Option<f64>,
    },
}

impl PanelSpec {
    /// Builds the settings of one panel, rejecting overrides that do not apply to it.
    pub fn new(
        kind: PanelKind,
        params: PanelParams,
        shared_annotations: Option<&[Annotation]>,
    ) -> MsaResult<Self> {
        let unsupported = |field: &str| {
            MsaPlotError::Validation(format!("{} does not apply to the {} panel", field, kind))
        };
        if let Some(size) = params.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(MsaPlotError::Validation(format!(
                    "font_size must be positive, got {}",
                    size
                )));
            }
        }

        match kind {
            PanelKind::Alignment => {
                if params.logo_mode.is_some() {
                    return Err(unsupported("logo_mode"));
                }
                if params.annotations.is_some() {
                    return Err(unsupported("annotations"));
                }
                Ok(PanelSpec::Alignment {
                    show_letters: params.show_letters,
                    show_names: params.show_names,
                    font_size: params.font_size,
                })
            }
            PanelKind::Consensus => {
                if params.show_names.is_some() {
                    return Err(unsupported("show_names"));
                }
                if params.font_size.is_some() {
                    return Err(unsupported("font_size"));
                }
                if params.logo_mode.is_some() {
                    return Err(unsupported("logo_mode"));
                }
                if params.annotations.is_some() {
                    return Err(unsupported("annotations"));
                }
                Ok(PanelSpec::Consensus {
                    show_letters: params.show_letters,
                })
            }
            PanelKind::Logo => {
                if params.show_letters.is_some() {
                    return Err(unsupported("show_letters"));
                }
                if params.show_names.is_some() {
                    return Err(unsupported("show_names"));
                }
                if params.font_size.is_some() {
                    return Err(unsupported("font_size"));
                }
                if params.annotations.is_some() {
                    return Err(unsupported("annotations"));
                }
                Ok(PanelSpec::Logo {
                    mode: params.logo_mode.unwrap_or_default(),
                })
            }
            PanelKind::Annotation => {
                if params.show_letters.is_some() {
                    return Err(unsupported("show_letters"));
                }
                if params.show_names.is_some() {
                    return Err(unsupported("show_names"));
                }
                if params.logo_mode.is_some() {
                    return Err(unsupported("logo_mode"));
                }
                let annotations = params
                    .annotations
                    .or_else(|| shared_annotations.map(|a| a.to_vec()))
                    .unwrap_or_default();
                if annotations.is_empty() {
                    return Err(MsaPlotError::MissingData {
                        field: "annotations",
                        panel: kind,
                    });
                }
                Ok(PanelSpec::Annotation {
                    annotations,
                    font_size: params.font_size,
                })
            }
        }
    }

    pub fn kind(&self) -> PanelKind {
        match self {
            PanelSpec::Alignment { .. } => PanelKind::Alignment,
            PanelSpec::Consensus { .. } => PanelKind::Consensus,
            PanelSpec::Logo { .. } => PanelKind::Logo,
            PanelSpec::Annotation { .. } => PanelKind::Annotation,
        }
    }
}

/// Fully validated description of one figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub alignment: Alignment,
    pub window: SeqWindow,
    pub color_map: Option<ColorMap>,
    pub panels: Vec<PanelSpec>,
    pub height_ratios: Vec<f64>,
    pub wrap: Option<usize>,
    pub figure_size: Option<(f64, f64)>,
}

impl FigureSpec {
    pub fn new(request: PlotRequest) -> MsaResult<Self> {
        let plot_type: PlotType = request.plot_type.parse()?;
        let kinds = match plot_type.single_panel() {
            Some(kind) => vec![kind],
            None => request
                .panels
                .iter()
                .map(|p| p.parse::<PanelKind>())
                .collect::<MsaResult<Vec<_>>>()?,
        };
        if kinds.is_empty() {
            return Err(MsaPlotError::validation("complex plots need at least one panel"));
        }

        let alignment = Alignment::new(&request.msa, request.seq_names)?;
        let window = SeqWindow::resolve(request.start, request.end, alignment.num_cols())?;

        let height_ratios = match request.panel_height_ratios {
            Some(ratios) => {
                if ratios.len() != kinds.len() {
                    return Err(MsaPlotError::Validation(format!(
                        "got {} panel height ratios for {} panels",
                        ratios.len(),
                        kinds.len()
                    )));
                }
                if let Some(bad) = ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
                    return Err(MsaPlotError::Validation(format!(
                        "panel height ratios must be positive, got {}",
                        bad
                    )));
                }
                ratios
            }
            None => vec![1.0; kinds.len()],
        };

        let params = match request.panel_params {
            Some(params) => {
                if params.len() != kinds.len() {
                    return Err(MsaPlotError::Validation(format!(
                        "got {} panel parameter sets for {} panels",
                        params.len(),
                        kinds.len()
                    )));
                }
                params
            }
            None => vec![PanelParams::default(); kinds.len()],
        };

        let panels = kinds
            .into_iter()
            .zip(params)
            .map(|(kind, params)| PanelSpec::new(kind, params, request.annotations.as_deref()))
            .collect::<MsaResult<Vec<_>>>()?;

        for panel in &panels {
            if let PanelSpec::Annotation { annotations, .. } = panel {
                check_annotations(annotations, &alignment, &window)?;
            }
        }

        if request.wrap == Some(0) {
            return Err(MsaPlotError::validation("wrap must be at least 1 column"));
        }

        let figure_size = match request.figsize {
            Some(size) => match size[..] {
                [width, height] if is_positive(width) && is_positive(height) => {
                    Some((width, height))
                }
                _ => {
                    return Err(MsaPlotError::Validation(format!(
                        "figsize must be two positive numbers, got {:?}",
                        size
                    )))
                }
            },
            None => None,
        };

        let color_map = request
            .color_map
            .as_ref()
            .map(ColorMap::explicit)
            .transpose()?;

        Ok(Self {
            alignment,
            window,
            color_map,
            panels,
            height_ratios,
            wrap: request.wrap,
            figure_size,
        })
    }
}

impl TryFrom<PlotRequest> for FigureSpec {
    type Error = MsaPlotError;
    fn try_from(request: PlotRequest) -> MsaResult<Self> {
        FigureSpec::new(request)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_annotations(
    annotations: &[Annotation],
    alignment: &Alignment,
    window: &SeqWindow,
) -> MsaResult<()> {
    for annotation in annotations {
        if annotation.end > alignment.num_cols() {
            return Err(MsaPlotError::Validation(format!(
                "annotation {:?} ends at {}, past alignment length {}",
                annotation.label,
                annotation.end,
                alignment.num_cols()
            )));
        }
        if window.intersect(annotation.start, annotation.end).is_none() {
            log::warn!(
                "Annotation {:?} [{}, {}) lies outside the plotted window",
                annotation.label,
                annotation.start,
                annotation.end
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_request() -> PlotRequest {
        PlotRequest::new(vec![
            "ATGCATGC".to_string(),
            "ATG-ATGC".to_string(),
            "ATGCATGC".to_string(),
        ])
    }

    fn complex_request(panels: &[&str]) -> PlotRequest {
        let mut request = example_request();
        request.plot_type = "complex".to_string();
        request.panels = panels.iter().map(|p| p.to_string()).collect();
        request
    }

    #[test]
    fn json_defaults_match_component_defaults() {
        let request = PlotRequest::from_json(r#"{"msa": ["AC", "AG"]}"#).unwrap();
        assert_eq!(request.plot_type, "msa");
        assert_eq!(request.panels, vec!["msa".to_string()]);
        let spec = FigureSpec::new(request).unwrap();
        assert_eq!(spec.panels.len(), 1);
        assert_eq!(spec.panels[0].kind(), PanelKind::Alignment);
        assert_eq!(spec.window, SeqWindow { start: 0, end: 2 });
        assert_eq!(spec.height_ratios, vec![1.0]);
    }

    #[test]
    fn json_without_msa_err() {
        assert!(PlotRequest::from_json(r#"{"plot_type": "msa"}"#).is_err());
    }

    #[test]
    fn single_panel_type_ignores_panel_list() {
        let mut request = complex_request(&["consensus", "logo"]);
        request.plot_type = "logo".to_string();
        let spec = FigureSpec::new(request).unwrap();
        assert_eq!(spec.panels, vec![PanelSpec::Logo { mode: LogoMode::Bits }]);
    }

    #[test]
    fn unknown_plot_type_err() {
        let mut request = example_request();
        request.plot_type = "heatmap".to_string();
        assert_eq!(
            FigureSpec::new(request),
            Err(MsaPlotError::UnknownPlotType("heatmap".to_string()))
        );
    }

    #[test]
    fn unknown_panel_kind_err() {
        let request = complex_request(&["msa", "tree"]);
        assert_eq!(
            FigureSpec::new(request),
            Err(MsaPlotError::UnknownPanelKind("tree".to_string()))
        );
    }

    #[test]
    fn empty_panel_list_err() {
        assert!(FigureSpec::new(complex_request(&[])).is_err());
    }

    #[test]
    fn ratio_count_mismatch_err() {
        let mut request = complex_request(&["msa", "consensus", "logo"]);
        request.panel_height_ratios = Some(vec![2.0, 1.0]);
        assert_eq!(
            FigureSpec::new(request),
            Err(MsaPlotError::Validation(
                "got 2 panel height ratios for 3 panels".to_string()
            ))
        );
    }

    #[test]
    fn non_positive_ratio_err() {
        let mut request = complex_request(&["msa", "logo"]);
        request.panel_height_ratios = Some(vec![1.0, 0.0]);
        assert!(FigureSpec::new(request).is_err());
    }

    #[test]
    fn window_end_before_start_err() {
        let mut request = example_request();
        request.start = Some(5);
        request.end = Some(3);
        assert!(matches!(
            FigureSpec::new(request),
            Err(MsaPlotError::Validation(_))
        ));
    }

    #[test]
    fn window_past_alignment_end_err() {
        let mut request = example_request();
        request.start = Some(2);
        request.end = Some(9);
        assert!(matches!(
            FigureSpec::new(request),
            Err(MsaPlotError::Validation(_))
        ));
    }

    #[test]
    fn annotation_plot_without_annotations_err() {
        let mut request = example_request();
        request.plot_type = "annotation".to_string();
        assert_eq!(
            FigureSpec::new(request),
            Err(MsaPlotError::MissingData {
                field: "annotations",
                panel: PanelKind::Annotation
            })
        );
    }

    #[test]
    fn annotation_panel_in_complex_plot_requires_annotations() {
        let mut request = complex_request(&["msa", "annotation"]);
        request.annotations = Some(Vec::new());
        assert!(matches!(
            FigureSpec::new(request),
            Err(MsaPlotError::MissingData { .. })
        ));
    }

    #[test]
    fn annotations_from_panel_params_take_precedence() {
        let mut request = complex_request(&["msa", "annotation"]);
        request.annotations = Some(vec![Annotation::new(0, 2, "shared", None).unwrap()]);
        request.panel_params = Some(vec![
            PanelParams::default(),
            PanelParams {
                annotations: Some(vec![Annotation::new(2, 4, "own", None).unwrap()]),
                ..PanelParams::default()
            },
        ]);
        let spec = FigureSpec::new(request).unwrap();
        match &spec.panels[1] {
            PanelSpec::Annotation { annotations, .. } => assert_eq!(annotations[0].label, "own"),
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn annotation_past_alignment_end_err() {
        let mut request = example_request();
        request.plot_type = "annotation".to_string();
        request.annotations = Some(vec![Annotation::new(4, 12, "long", None).unwrap()]);
        assert!(FigureSpec::new(request).is_err());
    }

    #[test]
    fn panel_params_count_mismatch_err() {
        let mut request = complex_request(&["msa", "logo"]);
        request.panel_params = Some(vec![PanelParams::default()]);
        assert!(FigureSpec::new(request).is_err());
    }

    #[test]
    fn override_for_other_panel_err() {
        let mut request = example_request();
        request.panel_params = Some(vec![PanelParams {
            logo_mode: Some(LogoMode::Probability),
            ..PanelParams::default()
        }]);
        assert_eq!(
            FigureSpec::new(request),
            Err(MsaPlotError::Validation(
                "logo_mode does not apply to the msa panel".to_string()
            ))
        );
    }

    #[test]
    fn unknown_override_key_err() {
        let json = r#"{"msa": ["AC"], "panel_params": [{"linewidth": 2}]}"#;
        assert!(PlotRequest::from_json(json).is_err());
    }

    #[test]
    fn panel_params_from_json() {
        let json = r#"{
            "msa": ["AC", "AG"],
            "plot_type": "complex",
            "panels": ["logo", "annotation"],
            "panel_params": [{"logo_mode": "probability"}, {"annotations": [[0, 1, "first"]]}]
        }"#;
        let spec = FigureSpec::new(PlotRequest::from_json(json).unwrap()).unwrap();
        assert_eq!(
            spec.panels[0],
            PanelSpec::Logo {
                mode: LogoMode::Probability
            }
        );
        assert_eq!(spec.panels[1].kind(), PanelKind::Annotation);
    }

    #[test]
    fn zero_wrap_err() {
        let mut request = example_request();
        request.wrap = Some(0);
        assert!(FigureSpec::new(request).is_err());
    }

    #[test]
    fn figsize_must_have_two_positive_values() {
        let mut request = example_request();
        request.figsize = Some(vec![10.0]);
        assert!(FigureSpec::new(request).is_err());

        let mut request = example_request();
        request.figsize = Some(vec![8.0, -1.0]);
        assert!(FigureSpec::new(request).is_err());

        let mut request = example_request();
        request.figsize = Some(vec![8.0, 4.0]);
        assert_eq!(
            FigureSpec::new(request).unwrap().figure_size,
            Some((8.0, 4.0))
        );
    }

    #[test]
    fn explicit_color_map_is_validated() {
        let mut request = example_request();
        request.color_map = Some(BTreeMap::from([("A".to_string(), vec![2.0, 0.0, 0.0])]));
        assert!(FigureSpec::new(request).is_err());
    }
}
