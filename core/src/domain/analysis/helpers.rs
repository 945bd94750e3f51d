use sha2::{Digest, Sha256};

/// Content-addressed reference for an uploaded image.
pub fn image_reference(image: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(image)))
}

/// Best-effort MIME type of an image buffer, defaulting to JPEG.
pub fn detect_image_mime(image: &[u8]) -> &'static str {
    match infer::get(image) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => kind.mime_type(),
        _ => "image/jpeg",
    }
}
