use serde::{Deserialize, Serialize};

use crate::domain::common::lenient::null_as_default;
use crate::domain::common::{AggregateRoot, EntityMetadata};

pub const ENDPOINT: &str = "/api/ztproducts-files/productsFilesCRUD";

// ============================================================================
// File type
// ============================================================================

/// Coarse file category stored in `FILETYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    Img,
    Pdf,
    Doc,
    Video,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Img => "IMG",
            FileType::Pdf => "PDF",
            FileType::Doc => "DOC",
            FileType::Video => "VIDEO",
            FileType::Other => "OTHER",
        }
    }

    /// Classify a browser-reported MIME type
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileType::Img
        } else if mime.starts_with("video/") {
            FileType::Video
        } else if mime == "application/pdf" {
            FileType::Pdf
        } else if mime.starts_with("text/")
            || mime == "application/msword"
            || mime == "application/rtf"
            || mime.starts_with("application/vnd.openxmlformats-officedocument")
            || mime.starts_with("application/vnd.ms-")
            || mime.starts_with("application/vnd.oasis.opendocument")
        {
            FileType::Doc
        } else {
            FileType::Other
        }
    }
}

impl From<String> for FileType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "IMG" | "IMAGE" => FileType::Img,
            "PDF" => FileType::Pdf,
            "DOC" => FileType::Doc,
            "VIDEO" => FileType::Video,
            _ => FileType::Other,
        }
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// File stored for a presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFile {
    #[serde(rename = "FILEID")]
    pub id: String,

    #[serde(rename = "IdPresentaOK", default, deserialize_with = "null_as_default")]
    pub presentation_id: String,

    /// Data URL or storage URL
    #[serde(rename = "FILE", default, deserialize_with = "null_as_default")]
    pub file: String,

    #[serde(rename = "FILETYPE", default = "default_file_type")]
    pub file_type: FileType,

    #[serde(rename = "ORIGINALNAME", default, deserialize_with = "null_as_default")]
    pub original_name: String,

    #[serde(rename = "PRINCIPAL", default, deserialize_with = "null_as_default")]
    pub principal: bool,

    #[serde(rename = "INFOAD", default, deserialize_with = "null_as_default")]
    pub extra_info: String,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

fn default_file_type() -> FileType {
    FileType::Other
}

impl ProductFile {
    pub fn is_image(&self) -> bool {
        self.file_type == FileType::Img
    }
}

impl AggregateRoot for ProductFile {
    fn key(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.original_name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn endpoint() -> &'static str {
        ENDPOINT
    }

    fn key_param() -> &'static str {
        "FILEID"
    }

    fn element_name() -> &'static str {
        "Archivo"
    }

    fn list_name() -> &'static str {
        "Archivos"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// File embedded in a presentation create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductFile {
    #[serde(rename = "FILE")]
    pub file: String,

    #[serde(rename = "FILETYPE")]
    pub file_type: FileType,

    #[serde(rename = "ORIGINALNAME")]
    pub original_name: String,

    #[serde(rename = "PRINCIPAL")]
    pub principal: bool,

    #[serde(rename = "INFOAD", default)]
    pub extra_info: String,
}

impl NewProductFile {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.starts_with("data:") || !self.file.contains(";base64,") {
            return Err(format!(
                "El archivo '{}' no tiene un contenido válido",
                self.original_name
            ));
        }
        Ok(())
    }
}

/// Body of the "mark principal" update
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalUpdate {
    #[serde(rename = "PRINCIPAL")]
    pub principal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_type_from_mime() {
        assert_eq!(FileType::from_mime("image/png"), FileType::Img);
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_mime("video/mp4"), FileType::Video);
        assert_eq!(
            FileType::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            FileType::Doc
        );
        assert_eq!(FileType::from_mime("application/zip"), FileType::Other);
    }

    #[test]
    fn test_decode_stored_file() {
        let file: ProductFile = serde_json::from_value(json!({
            "FILEID": "F1",
            "IdPresentaOK": "SKU1-CAJA",
            "FILE": "https://cdn/x.png",
            "FILETYPE": "img",
            "ORIGINALNAME": "x.png",
            "PRINCIPAL": null,
            "INFOAD": null
        }))
        .unwrap();
        assert!(file.is_image());
        assert!(!file.principal);
        assert_eq!(serde_json::to_value(file.file_type).unwrap(), json!("IMG"));
    }

    #[test]
    fn test_new_file_requires_data_url() {
        let mut file = NewProductFile {
            file: "data:image/png;base64,AAAA".into(),
            file_type: FileType::Img,
            original_name: "x.png".into(),
            principal: true,
            extra_info: String::new(),
        };
        assert!(file.validate().is_ok());
        file.file = "x.png".into();
        assert!(file.validate().is_err());
    }
}
