use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;

use crate::error::AppError;
use crate::storage::UploadRules;

/// Largest accepted text field in an upload form.
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// A validated file plus the form's text fields.
#[derive(Debug)]
pub struct UploadForm {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads a multipart form holding one `file` part and optional text parts.
///
/// The content type is checked before the file body is read and the size limit
/// is enforced while streaming, so rejected uploads never reach storage.
pub async fn read_upload_form(
    multipart: &mut Multipart,
    rules: UploadRules,
) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            Some(file_name) => {
                if file.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one file may be uploaded at a time".to_string(),
                    ));
                }

                let content_type = field
                    .content_type()
                    .map(|m| m.essence_str().to_string())
                    .filter(|m| m != "application/octet-stream")
                    .or_else(|| {
                        mime_guess::from_path(&file_name)
                            .first()
                            .map(|m| m.essence_str().to_string())
                    })
                    .unwrap_or_default();
                rules.check_content_type(&content_type)?;

                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk?;
                    if bytes.len() + chunk.len() > rules.max_bytes {
                        rules.check_size(bytes.len() + chunk.len())?;
                    }
                    bytes.extend_from_slice(&chunk);
                }
                rules.check_size(bytes.len())?;

                file = Some((file_name, content_type, bytes));
            }
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk?;
                    if value.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                        return Err(AppError::PayloadTooLarge(format!(
                            "Field `{}` is too long",
                            name
                        )));
                    }
                    value.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(value).map_err(|_| {
                    AppError::BadRequest(format!("Field `{}` is not valid UTF-8", name))
                })?;
                fields.insert(name, value);
            }
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        fields,
    })
}
