use crate::cli::RenderArgs;
use crate::msa::render_request;
use crate::utils::{read_request, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub fn render(args: RenderArgs) -> Result<()> {
    let request = read_request(&args.request_path)?;
    let payload = render_request(request).map_err(|e| e.to_string())?;
    let json = payload.to_json().map_err(|e| e.to_string())?;

    let writer: Box<dyn Write> = match &args.output_path {
        Some(path) => Box::new(File::create(path).map_err(|e| format!("{}: {}", path, e))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", json).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())?;
    log::info!("Rendered {} payload ({} base64 characters)", payload.mime, payload.data.len());
    Ok(())
}
