use crate::cli::ValidateArgs;
use crate::msa::{FigureSpec, PanelSpec};
use crate::utils::{read_request, Result};
use itertools::Itertools;

pub fn validate(args: ValidateArgs) -> Result<()> {
    let request = read_request(&args.request_path)?;
    let spec = FigureSpec::new(request).map_err(|e| e.to_string())?;
    log::info!("{}", summarize(&spec));
    log::info!("Validation successful");
    Ok(())
}

fn summarize(spec: &FigureSpec) -> String {
    let panels = spec.panels.iter().map(|p| p.kind().to_string()).join(",");
    let num_annotations: usize = spec
        .panels
        .iter()
        .map(|p| match p {
            PanelSpec::Annotation { annotations, .. } => annotations.len(),
            _ => 0,
        })
        .sum();
    let colors = match &spec.color_map {
        Some(map) => format!("explicit ({} symbols)", map.len()),
        None => "derived".to_string(),
    };
    format!(
        "Sequences={}, columns={}, alphabet={:?}, window={}-{}, panels=[{}], annotations={}, colors={}",
        spec.alignment.num_rows(),
        spec.alignment.num_cols(),
        spec.alignment.alphabet(),
        spec.window.start,
        spec.window.end,
        panels,
        num_annotations,
        colors
    )
}
