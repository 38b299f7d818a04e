use super::{fallback_display, CellDisplay, CellEditor, Draft, InputAffordance};
use crate::validation::ValidationError;
use crate::{CellValue, CellVariant, FileRef};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "avi"];

/// File reference editor.
///
/// `accept` lists extensions (`pdf`, `.pdf`) or media families
/// (`image/*`, `audio/*`, `video/*`). An empty list accepts anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileEditor {
    pub accept: Vec<String>,
}

impl FileEditor {
    pub fn new(accept: Vec<String>) -> Self {
        Self { accept }
    }

    pub fn accepts(&self, file: &FileRef) -> bool {
        if self.accept.is_empty() {
            return true;
        }
        let Some(extension) = file.extension() else {
            return false;
        };

        self.accept.iter().any(|pattern| {
            let pattern = pattern.trim().to_ascii_lowercase();
            match pattern.as_str() {
                "*" | "*/*" => true,
                "image/*" => IMAGE_EXTENSIONS.contains(&extension.as_str()),
                "audio/*" => AUDIO_EXTENSIONS.contains(&extension.as_str()),
                "video/*" => VIDEO_EXTENSIONS.contains(&extension.as_str()),
                other => other.trim_start_matches('.') == extension,
            }
        })
    }
}

/// File name from the last path segment of a link
pub(crate) fn name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    if name.is_empty() {
        url.to_string()
    } else {
        name.to_string()
    }
}

impl CellEditor for FileEditor {
    fn variant(&self) -> CellVariant {
        CellVariant::File
    }

    fn affordance(&self) -> InputAffordance {
        InputAffordance::FilePicker {
            accept: self.accept.clone(),
        }
    }

    fn coerce(&self, raw: &serde_json::Value) -> CellValue {
        use serde_json::Value;
        match raw {
            Value::Null => CellValue::Empty,
            Value::String(s) if s.trim().is_empty() => CellValue::Empty,
            Value::String(s) if s.contains("://") => {
                CellValue::File(FileRef::new(name_from_url(s)).with_url(s.clone()))
            }
            Value::String(s) => CellValue::File(FileRef::new(s.clone())),
            Value::Object(_) => match serde_json::from_value::<FileRef>(raw.clone()) {
                Ok(file) => CellValue::File(file),
                Err(err) => {
                    tracing::debug!(%err, "file value without a name");
                    CellValue::Text(raw.to_string())
                }
            },
            other => CellValue::Text(other.to_string()),
        }
    }

    fn display(&self, value: &CellValue) -> CellDisplay {
        match value {
            CellValue::File(file) => CellDisplay::File {
                name: file.name.clone(),
                href: file.url.clone(),
            },
            other => fallback_display(other),
        }
    }

    fn draft(&self, value: &CellValue) -> Draft {
        match value {
            CellValue::File(file) => Draft::File(Some(file.clone())),
            _ => Draft::File(None),
        }
    }

    fn validate(&self, draft: &Draft) -> Result<CellValue, ValidationError> {
        match draft {
            Draft::File(None) => Ok(CellValue::Empty),
            Draft::File(Some(file)) if file.name.trim().is_empty() => Ok(CellValue::Empty),
            Draft::File(Some(file)) => {
                if self.accepts(file) {
                    Ok(CellValue::File(file.clone()))
                } else {
                    Err(ValidationError::FileTypeNotAccepted {
                        name: file.name.clone(),
                        accepted: self.accept.clone(),
                    })
                }
            }
            _ => Err(ValidationError::IncompatibleInput),
        }
    }
}
