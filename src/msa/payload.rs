use super::compose::RenderedImage;
use super::error::{MsaPlotError, MsaResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Tagged image handed back to the host UI, which displays it as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    pub mime: String,
}

impl ImagePayload {
    pub fn from_image(image: &RenderedImage) -> Self {
        Self {
            kind: "image".to_string(),
            data: STANDARD.encode(&image.data),
            mime: image.mime().to_string(),
        }
    }

    pub fn to_json(&self) -> MsaResult<String> {
        serde_json::to_string(self).map_err(|e| MsaPlotError::Render(e.to_string()))
    }

    pub fn decode(&self) -> MsaResult<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| MsaPlotError::Validation(format!("payload data is not base64: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelplot::ImageFormat;

    #[test]
    fn payload_is_tagged_as_image() {
        let image = RenderedImage {
            data: vec![0x89, b'P', b'N', b'G'],
            format: ImageFormat::Png,
        };
        let payload = ImagePayload::from_image(&image);
        assert_eq!(payload.kind, "image");
        assert_eq!(payload.mime, "image/png");
        assert_eq!(payload.data, "iVBORw==");
        assert_eq!(payload.decode().unwrap(), image.data);

        let json = payload.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"type":"image","data":"iVBORw==","mime":"image/png"}"#
        );
    }

    #[test]
    fn rendered_request_payload_holds_png() {
        let request = crate::msa::PlotRequest::new(vec!["ACGT".to_string(), "AC-T".to_string()]);
        let payload = crate::msa::render_request(request).unwrap();
        assert!(payload.data.starts_with("iVBORw0KGgo"));
    }
}
