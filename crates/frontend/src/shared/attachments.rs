//! Files attached to a presentation draft before it is sent.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use contracts::domain::a006_product_file::{FileType, NewProductFile};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Ordered attachments with at most one principal file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentList {
    files: Vec<NewProductFile>,
    /// A stored file of the presentation is already principal
    has_external_principal: bool,
}

impl AttachmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// For a presentation that already has a principal file on the server
    pub fn with_external_principal(has_principal: bool) -> Self {
        Self {
            files: Vec::new(),
            has_external_principal: has_principal,
        }
    }

    pub fn files(&self) -> &[NewProductFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append a file. The first file of the session becomes principal.
    pub fn attach(&mut self, mut file: NewProductFile) {
        file.principal = !self.has_external_principal && !self.files.iter().any(|f| f.principal);
        self.files.push(file);
    }

    pub fn remove(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        let removed = self.files.remove(index);
        if removed.principal {
            if let Some(first) = self.files.first_mut() {
                first.principal = true;
            }
        }
    }

    pub fn set_principal(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        for (i, file) in self.files.iter_mut().enumerate() {
            file.principal = i == index;
        }
    }

    pub fn into_files(self) -> Vec<NewProductFile> {
        self.files
    }
}

/// `data:<mime>;base64,<payload>`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        "application/octet-stream"
    } else {
        mime.trim()
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read a browser `File` into an attachment (not principal yet)
pub async fn read_file(file: &web_sys::File) -> Result<NewProductFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("No se pudo leer {}: {:?}", file.name(), e))?;
    let buffer = buffer
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|_| format!("No se pudo leer {}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = file.type_();

    Ok(NewProductFile {
        file: to_data_url(&mime, &bytes),
        file_type: FileType::from_mime(&mime),
        original_name: file.name(),
        principal: false,
        extra_info: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> NewProductFile {
        NewProductFile {
            file: to_data_url("image/png", name.as_bytes()),
            file_type: FileType::Img,
            original_name: name.into(),
            principal: false,
            extra_info: String::new(),
        }
    }

    fn principals(list: &AttachmentList) -> Vec<&str> {
        list.files()
            .iter()
            .filter(|f| f.principal)
            .map(|f| f.original_name.as_str())
            .collect()
    }

    #[test]
    fn test_first_file_is_principal() {
        let mut list = AttachmentList::new();
        list.attach(file("a.png"));
        list.attach(file("b.png"));
        assert_eq!(principals(&list), vec!["a.png"]);
    }

    #[test]
    fn test_set_principal_is_exclusive() {
        let mut list = AttachmentList::new();
        list.attach(file("a.png"));
        list.attach(file("b.png"));
        list.set_principal(1);
        assert_eq!(principals(&list), vec!["b.png"]);
    }

    #[test]
    fn test_removing_principal_promotes_first() {
        let mut list = AttachmentList::new();
        list.attach(file("a.png"));
        list.attach(file("b.png"));
        list.attach(file("c.png"));
        list.remove(0);
        assert_eq!(principals(&list), vec!["b.png"]);
        list.remove(5);
        assert_eq!(list.files().len(), 2);
    }

    #[test]
    fn test_external_principal_is_respected() {
        let mut list = AttachmentList::with_external_principal(true);
        list.attach(file("a.png"));
        assert!(principals(&list).is_empty());
    }

    #[test]
    fn test_data_url() {
        assert_eq!(to_data_url("text/plain", b"hola"), "data:text/plain;base64,aG9sYQ==");
        assert!(to_data_url("", b"x").starts_with("data:application/octet-stream;base64,"));
        assert!(file("a.png").validate().is_ok());
    }
}
