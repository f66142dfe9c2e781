use actix_multipart::Field;
use futures_util::TryStreamExt;
use crate::errors::AppError;
use crate::services::employee::ImageUpload;

pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

pub struct FieldData {
    pub bytes: Vec<u8>,
    /// Set when the part was larger than the limit; the rest was drained and dropped.
    pub truncated: bool,
}

pub fn field_name(field: &Field) -> String {
    field
        .content_disposition()
        .get_name()
        .unwrap_or_default()
        .to_string()
}

pub async fn read_field(field: &mut Field, limit: usize) -> Result<FieldData, AppError> {
    let mut data = FieldData {
        bytes: Vec::new(),
        truncated: false,
    };

    while let Some(chunk) = field.try_next().await? {
        if data.truncated || data.bytes.len() + chunk.len() > limit {
            data.truncated = true;
            continue;
        }
        data.bytes.extend_from_slice(&chunk);
    }
    Ok(data)
}

pub async fn read_text(field: &mut Field, name: &str) -> Result<String, AppError> {
    let data = read_field(field, MAX_TEXT_FIELD_BYTES).await?;
    if data.truncated {
        return Err(AppError::BadRequest(format!("Field '{}' is too large", name)));
    }
    String::from_utf8(data.bytes)
        .map_err(|_| AppError::BadRequest(format!("Field '{}' is not valid UTF-8", name)))
}

/// An empty file part (no file chosen in the browser) counts as no image.
/// A part over `limit` is still drained and handed back flagged, so the size
/// error is reported next to the other field errors.
pub async fn read_image(field: &mut Field, limit: usize) -> Result<Option<ImageUpload>, AppError> {
    let data = read_field(field, limit).await?;
    if data.truncated {
        return Ok(Some(ImageUpload::oversized(data.bytes)));
    }
    if data.bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageUpload::new(data.bytes)))
}

/// Course lists arrive either as a JSON array (`["MCA","BSC"]`) or comma
/// separated (`MCA,BSC`).
pub fn parse_course(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(codes) => codes,
        Err(_) => raw.split(',').map(|code| code.to_string()).collect(),
    }
}
