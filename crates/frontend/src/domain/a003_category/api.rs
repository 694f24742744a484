//! Category service (`categoriasCRUD`)

use crate::shared::api_utils::{validated, ApiClient, ApiError, DeleteMode, SaveOutcome};
use contracts::domain::a003_category::{Category, CategoryForm};

pub async fn fetch_all(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
    api.fetch_all::<Category>(&[]).await
}

pub async fn fetch_one(api: &ApiClient, catid: &str) -> Result<Category, ApiError> {
    api.require_one::<Category>(catid).await
}

pub async fn create(api: &ApiClient, form: &CategoryForm) -> Result<(), ApiError> {
    validated(form.validate())?;
    api.add_one::<Category, _>(form).await.map(|_| ())
}

/// Diff-based update. A rename changes `CATID` too; the record is still
/// addressed by its stored key.
pub async fn update(
    api: &ApiClient,
    catid: &str,
    original: &CategoryForm,
    draft: &CategoryForm,
) -> Result<SaveOutcome, ApiError> {
    validated(draft.validate())?;
    api.update_changed::<Category, _>(catid, original, draft).await
}

pub async fn set_active(api: &ApiClient, catid: &str, active: bool) -> Result<(), ApiError> {
    api.set_active::<Category>(catid, active).await
}

pub async fn delete(api: &ApiClient, catid: &str, mode: DeleteMode) -> Result<(), ApiError> {
    api.delete::<Category>(catid, mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_all_unwraps_envelope() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "value": [{ "data": [{ "dataRes": [
                { "CATID": "CAT_HERRAMIENTAS", "Nombre": "Herramientas" },
                { "CATID": "CAT_TALADROS", "Nombre": "Taladros", "PadreCATID": "CAT_HERRAMIENTAS", "ACTIVED": false }
            ] }] }] }),
        );
        let categories = block_on(fetch_all(&client(&mock))).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].parent_id.as_deref(), Some("CAT_HERRAMIENTAS"));
        assert!(mock.requests()[0].url.contains("ProcessType=GetAll"));
    }

    #[test]
    fn test_rename_sends_only_changed_fields() {
        let mock = MockTransport::new();
        let api = client(&mock);
        let mut original = CategoryForm::default();
        original.rename("Herramientas");
        let mut draft = original.clone();
        draft.rename("Herramientas eléctricas");

        let outcome = block_on(update(&api, "CAT_HERRAMIENTAS", &original, &draft)).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        let url = &mock.requests()[0].url;
        assert!(url.contains("ProcessType=UpdateOne"));
        assert!(url.contains("catid=CAT_HERRAMIENTAS"));
        assert_eq!(
            mock.request_body(0),
            json!({ "CATID": "CAT_HERRAMIENTAS_ELECTRICAS", "Nombre": "Herramientas eléctricas" })
        );
    }

    #[test]
    fn test_unchanged_makes_no_call() {
        let mock = MockTransport::new();
        let mut form = CategoryForm::default();
        form.rename("Herramientas");
        let outcome = block_on(update(&client(&mock), "CAT_HERRAMIENTAS", &form, &form.clone())).unwrap();
        assert_eq!(outcome, SaveOutcome::Unchanged);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_invalid_form_is_rejected_before_call() {
        let mock = MockTransport::new();
        let result = block_on(create(&client(&mock), &CategoryForm::default()));
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(mock.requests().is_empty());
    }
}
