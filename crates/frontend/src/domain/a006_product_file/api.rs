//! File service (`productsFilesCRUD`).
//!
//! Files are created embedded in presentation payloads; this endpoint only
//! lists, deletes and re-flags them.

use crate::shared::api_utils::{ApiClient, ApiError, DeleteMode};
use contracts::domain::a006_product_file::{PrincipalUpdate, ProductFile, ENDPOINT};
use contracts::domain::common::{AggregateRoot, ProcessType};

const OWNER_PARAM: &str = "IdPresentaOK";

/// Stored files of one presentation, principal first
pub async fn fetch_for_presentation(api: &ApiClient, presentation_id: &str) -> Result<Vec<ProductFile>, ApiError> {
    let mut files: Vec<ProductFile> = api
        .list(ENDPOINT, ProcessType::GetAll, &[(OWNER_PARAM, presentation_id)])
        .await?;
    // the filter parameter is not honoured by every backend
    files.retain(|f| f.presentation_id.is_empty() || f.presentation_id == presentation_id);
    files.sort_by_key(|f| !f.principal);
    Ok(files)
}

pub async fn delete(api: &ApiClient, file_id: &str) -> Result<(), ApiError> {
    api.delete::<ProductFile>(file_id, DeleteMode::Hard).await
}

pub async fn set_principal(api: &ApiClient, file_id: &str) -> Result<(), ApiError> {
    let body = serde_json::to_value(PrincipalUpdate { principal: true })?;
    api.process(ENDPOINT, ProcessType::UpdateOne, &[(ProductFile::key_param(), file_id)], Some(body))
        .await
        .map(|_| ())
}

/// Local mirror of a successful `set_principal`
pub fn mark_principal(files: &mut [ProductFile], file_id: &str) {
    for file in files.iter_mut() {
        file.principal = file.id == file_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    fn stored() -> serde_json::Value {
        json!({ "value": [{ "data": [{ "dataRes": [
            { "FILEID": "F1", "IdPresentaOK": "TAL-1-CAJA", "FILE": "data:image/png;base64,AA==", "FILETYPE": "IMG", "ORIGINALNAME": "a.png" },
            { "FILEID": "F2", "IdPresentaOK": "TAL-1-CAJA", "FILE": "data:application/pdf;base64,AA==", "FILETYPE": "PDF", "ORIGINALNAME": "ficha.pdf", "PRINCIPAL": true },
            { "FILEID": "F3", "IdPresentaOK": "OTRA", "FILETYPE": "IMG", "ORIGINALNAME": "x.png" }
        ] }] }] })
    }

    #[test]
    fn test_fetch_filters_and_puts_principal_first() {
        let mock = MockTransport::new();
        mock.respond(200, stored());
        let files = block_on(fetch_for_presentation(&client(&mock), "TAL-1-CAJA")).unwrap();
        let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F2", "F1"]);
        assert!(mock.requests()[0].url.contains("IdPresentaOK=TAL-1-CAJA"));
    }

    #[test]
    fn test_delete_is_hard() {
        let mock = MockTransport::new();
        block_on(delete(&client(&mock), "F1")).unwrap();
        let url = &mock.requests()[0].url;
        assert!(url.contains("ProcessType=DeleteHard"));
        assert!(url.contains("FILEID=F1"));
    }

    #[test]
    fn test_set_principal_body() {
        let mock = MockTransport::new();
        block_on(set_principal(&client(&mock), "F1")).unwrap();
        assert!(mock.requests()[0].url.contains("ProcessType=UpdateOne"));
        assert_eq!(mock.request_body(0), json!({ "PRINCIPAL": true }));
    }

    #[test]
    fn test_mark_principal_is_exclusive() {
        let mock = MockTransport::new();
        mock.respond(200, stored());
        let mut files = block_on(fetch_for_presentation(&client(&mock), "TAL-1-CAJA")).unwrap();
        mark_principal(&mut files, "F1");
        let principals: Vec<&str> = files.iter().filter(|f| f.principal).map(|f| f.id.as_str()).collect();
        assert_eq!(principals, vec!["F1"]);
    }
}
