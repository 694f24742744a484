//! Price item service (`preciosItemsCRUD`)

use crate::shared::api_utils::{validated, ApiClient, ApiError, DeleteMode, SaveOutcome};
use contracts::domain::a005_price_item::{PriceItem, PriceItemForm};

/// Items of one price list. The list id is sent as a filter and applied
/// again locally since `GetAll` may return every item.
pub async fn fetch_for_list(api: &ApiClient, list_id: &str) -> Result<Vec<PriceItem>, ApiError> {
    let mut items = api.fetch_all::<PriceItem>(&[("IdListaOK", list_id)]).await?;
    items.retain(|i| i.list_id == list_id);
    Ok(items)
}

pub async fn fetch_one(api: &ApiClient, id: &str) -> Result<PriceItem, ApiError> {
    api.require_one::<PriceItem>(id).await
}

pub async fn create(api: &ApiClient, form: &PriceItemForm) -> Result<(), ApiError> {
    validated(form.validate())?;
    api.add_one::<PriceItem, _>(form).await.map(|_| ())
}

pub async fn update(
    api: &ApiClient,
    id: &str,
    original: &PriceItemForm,
    draft: &PriceItemForm,
) -> Result<SaveOutcome, ApiError> {
    validated(draft.validate())?;
    api.update_changed::<PriceItem, _>(id, original, draft).await
}

pub async fn set_active(api: &ApiClient, id: &str, active: bool) -> Result<(), ApiError> {
    api.set_active::<PriceItem>(id, active).await
}

pub async fn delete(api: &ApiClient, id: &str, mode: DeleteMode) -> Result<(), ApiError> {
    api.delete::<PriceItem>(id, mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_keeps_only_requested_list() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "value": [{ "data": [{ "dataRes": [
                { "IdPrecioOK": "L1-P1", "IdListaOK": "L1", "IdPresentaOK": "P1", "Precio": 10 },
                { "IdPrecioOK": "L2-P1", "IdListaOK": "L2", "IdPresentaOK": "P1", "Precio": 12 },
                { "IdPrecioOK": "L1-P2", "IdListaOK": "L1", "IdPresentaOK": "P2", "Precio": "8.5" }
            ] }] }] }),
        );
        let items = block_on(fetch_for_list(&client(&mock), "L1")).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["L1-P1", "L1-P2"]);
        assert!(mock.requests()[0].url.contains("IdListaOK=L1"));
    }

    #[test]
    fn test_create_derives_id() {
        let mock = MockTransport::new();
        let mut form = PriceItemForm::for_list("LISTA-2024");
        form.set_presentation("TAL-1-CAJA");
        form.price = 1499.0;
        block_on(create(&client(&mock), &form)).unwrap();
        assert_eq!(
            mock.request_body(0),
            json!({ "IdPrecioOK": "LISTA-2024-TAL-1-CAJA", "IdListaOK": "LISTA-2024", "IdPresentaOK": "TAL-1-CAJA", "Precio": 1499.0 })
        );
    }

    #[test]
    fn test_price_change_only() {
        let mock = MockTransport::new();
        let mut original = PriceItemForm::for_list("L1");
        original.set_presentation("P1");
        original.price = 10.0;
        let mut draft = original.clone();
        draft.price = 11.25;
        let outcome = block_on(update(&client(&mock), "L1-P1", &original, &draft)).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(mock.requests()[0].url.contains("IdPrecioOK=L1-P1"));
        assert_eq!(mock.request_body(0), json!({ "Precio": 11.25 }));
    }

    #[test]
    fn test_missing_presentation_rejected() {
        let mock = MockTransport::new();
        let form = PriceItemForm::for_list("L1");
        assert!(matches!(block_on(create(&client(&mock), &form)), Err(ApiError::Validation(_))));
        assert!(mock.requests().is_empty());
    }
}
