use crate::{pdf, png, svg, Figure};
use std::path::Path;

/// Encodes the figure in the requested format and returns the bytes.
pub fn render(figure: &Figure, format: ImageFormat) -> Result<Vec<u8>, String> {
    let svg_content = svg::generate_string(figure);
    match format {
        ImageFormat::Svg => Ok(svg_content.into_bytes()),
        ImageFormat::Png => png::render_from_string(&svg_content),
        ImageFormat::Pdf => pdf::render_from_string(&svg_content),
    }
}

/// Writes the figure to `path`, picking the format from the file extension.
pub fn generate(figure: &Figure, path: &Path) -> Result<(), String> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        let format = ImageFormat::from_extension(extension)
            .ok_or(format!("Unsupported file extension: {extension:?}"))?;
        let bytes = render(figure, format)?;
        std::fs::write(path, bytes).map_err(|e| format!("{}: {}", path.display(), e))
    } else {
        Err(format!("Failed to get extension from path: {path:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFormat {
    Svg,
    Png,
    Pdf,
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "svg" => Some(ImageFormat::Svg),
            "png" => Some(ImageFormat::Png),
            "pdf" => Some(ImageFormat::Pdf),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Png => "image/png",
            ImageFormat::Pdf => "application/pdf",
        }
    }
}
