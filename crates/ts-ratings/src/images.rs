use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::constants::PHOTO_MIME_TYPE;
use crate::error::DecodeError;

/// An undecoded image as it travels on the wire: base64 bytes plus the
/// declared MIME type. Immutable; it lives only as long as the result set
/// that carried it.
#[derive(Clone, Debug, Serialize)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Wrap a raw base64 payload declared as JPEG, the only photo type the
    /// service emits today.
    pub fn jpeg(data: String) -> Self {
        Self {
            data,
            mime_type: PHOTO_MIME_TYPE.to_string(),
        }
    }
}

/// A decoded, displayable image. Dropping the handle is the release: the
/// decoded bytes live exactly as long as the gallery that owns the handle,
/// so a torn-down card cannot leak them.
#[derive(Debug)]
pub struct ImageHandle {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageHandle {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Render the image as a `data:` URL for direct display.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Decode an encoded image into a displayable handle. Pure decoding, no
/// network: any syntactically valid base64 payload materializes, and a
/// malformed one fails only this image; siblings still render.
pub fn materialize(image: &EncodedImage) -> Result<ImageHandle, DecodeError> {
    let bytes = STANDARD.decode(image.data.as_bytes())?;
    Ok(ImageHandle {
        bytes,
        mime_type: image.mime_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialize_decodes_payload() {
        let image = EncodedImage::jpeg(STANDARD.encode(b"not really a jpeg"));
        let handle = materialize(&image).unwrap();
        assert_eq!(handle.bytes(), b"not really a jpeg");
        assert_eq!(handle.mime_type(), "image/jpeg");
    }

    #[test]
    fn data_url_carries_mime_type_and_payload() {
        let image = EncodedImage::jpeg("aGVsbG8=".to_string());
        let handle = materialize(&image).unwrap();
        assert_eq!(handle.to_data_url(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let image = EncodedImage::jpeg("!!! not base64 !!!".to_string());
        let result = materialize(&image);
        assert!(matches!(result, Err(DecodeError::InvalidBase64(_))));
    }

    #[test]
    fn empty_payload_is_valid_base64_for_zero_bytes() {
        let image = EncodedImage::jpeg(String::new());
        let handle = materialize(&image).unwrap();
        assert!(handle.bytes().is_empty());
    }
}
