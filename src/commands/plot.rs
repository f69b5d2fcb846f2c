use crate::cli::PlotArgs;
use crate::msa::{build_figure, FigureSpec, PlotRequest};
use crate::utils::{read_annotations, read_fasta, read_request, Result};
use panelplot::generate_image;
use std::path::Path;

pub fn plot(args: PlotArgs) -> Result<()> {
    let request = assemble_request(&args)?;
    let spec = FigureSpec::new(request).map_err(|e| e.to_string())?;
    log::info!(
        "Plotting {} sequences, columns {}-{}",
        spec.alignment.num_rows(),
        spec.window.start,
        spec.window.end
    );

    let (mut figure, _) = build_figure(&spec);
    if let Some(font_family) = &args.font_family {
        figure.set_font_family(font_family);
    }

    generate_image(&figure, Path::new(&args.output_path))?;
    log::info!("Wrote {}", args.output_path);
    Ok(())
}

/// Starts from the JSON request or the FASTA alignment, then applies
/// command-line overrides on top.
fn assemble_request(args: &PlotArgs) -> Result<PlotRequest> {
    let mut request = match (&args.request_path, &args.fasta_path) {
        (Some(path), _) => read_request(path)?,
        (None, Some(path)) => {
            let (names, seqs) = read_fasta(path)?;
            let mut request = PlotRequest::new(seqs);
            request.seq_names = Some(names);
            request
        }
        (None, None) => return Err("Either a request or a FASTA file is required".to_string()),
    };

    if let Some(plot_type) = &args.plot_type {
        request.plot_type = plot_type.clone();
    }
    if let Some(panels) = &args.panels {
        request.panels = panels.clone();
    }
    if let Some(window) = args.window {
        request.start = Some(window.start);
        request.end = Some(window.end);
    }
    if args.wrap.is_some() {
        request.wrap = args.wrap;
    }
    if let Some((width, height)) = args.figsize {
        request.figsize = Some(vec![width, height]);
    }
    if let Some(path) = &args.annotations_path {
        request.annotations = Some(read_annotations(path)?);
    }
    Ok(request)
}
