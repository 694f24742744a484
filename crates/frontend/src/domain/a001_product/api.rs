//! Product service (`productsCRUD` plus the composite create)

use crate::shared::api_utils::{validated, ApiClient, ApiError, DeleteMode, SaveOutcome};
use contracts::domain::a001_product::{CompleteProductRequest, Product, ProductForm, COMPLETE_ENDPOINT};

pub async fn fetch_all(api: &ApiClient) -> Result<Vec<Product>, ApiError> {
    api.fetch_all::<Product>(&[]).await
}

pub async fn fetch_one(api: &ApiClient, skuid: &str) -> Result<Product, ApiError> {
    api.require_one::<Product>(skuid).await
}

/// Product and presentations in one call; the backend assigns the SKU
pub async fn create_complete(api: &ApiClient, request: &CompleteProductRequest) -> Result<(), ApiError> {
    validated(request.validate())?;
    let body = serde_json::to_value(request)?;
    log::debug!(
        "crearProductoCompleto: '{}' with {} presentation(s)",
        request.product.name,
        request.presentations.len()
    );
    api.post_json(COMPLETE_ENDPOINT, &[("LoggedUser", api.logged_user())], Some(body))
        .await
        .map(|_| ())
}

pub async fn update(
    api: &ApiClient,
    skuid: &str,
    original: &ProductForm,
    draft: &ProductForm,
) -> Result<SaveOutcome, ApiError> {
    validated(draft.validate())?;
    api.update_changed::<Product, _>(skuid, original, draft).await
}

pub async fn set_active(api: &ApiClient, skuid: &str, active: bool) -> Result<(), ApiError> {
    api.set_active::<Product>(skuid, active).await
}

pub async fn delete(api: &ApiClient, skuid: &str, mode: DeleteMode) -> Result<(), ApiError> {
    api.delete::<Product>(skuid, mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use contracts::domain::a002_presentation::{ExtraProperties, NewPresentation};
    use futures::executor::block_on;
    use serde_json::json;

    fn form() -> ProductForm {
        ProductForm {
            name: "Taladro Inalámbrico".into(),
            description: "Taladro 18V con percutor".into(),
            brand: "Truper".into(),
            unit: "PZA".into(),
            categories: vec!["CAT_HERRAMIENTAS".into()],
            ..Default::default()
        }
    }

    fn presentation() -> NewPresentation {
        NewPresentation {
            id: "TALADRO-INALAMBRICO-LX1-CAJA".into(),
            sku_id: String::new(),
            name: "Caja".into(),
            description: "Caja individual".into(),
            cost_initial: 900.0,
            cost_final: 1150.0,
            extra: ExtraProperties::default(),
            is_active: true,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_complete_create_posts_to_composite_endpoint() {
        let mock = MockTransport::new();
        let request = CompleteProductRequest {
            product: form(),
            presentations: vec![presentation()],
        };
        block_on(create_complete(&client(&mock), &request)).unwrap();

        let url = &mock.requests()[0].url;
        assert_eq!(url, "http://api.test/api/ztproducts/crearProductoCompleto?LoggedUser=USR01");
        let body = mock.request_body(0);
        assert_eq!(body["product"]["MARCA"], json!("Truper"));
        assert!(body["product"].get("SKUID").is_none());
        assert_eq!(body["presentations"][0]["IdPresentaOK"], json!("TALADRO-INALAMBRICO-LX1-CAJA"));
        assert!(body["presentations"][0].get("SKUID").is_none());
    }

    #[test]
    fn test_complete_create_without_presentations_is_rejected() {
        let mock = MockTransport::new();
        let request = CompleteProductRequest {
            product: form(),
            presentations: Vec::new(),
        };
        let result = block_on(create_complete(&client(&mock), &request));
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_update_sends_category_change() {
        let mock = MockTransport::new();
        let original = form();
        let mut draft = form();
        draft.toggle_category("CAT_TALADROS");
        block_on(update(&client(&mock), "TALADRO-LX1", &original, &draft)).unwrap();
        assert!(mock.requests()[0].url.contains("skuid=TALADRO-LX1"));
        assert_eq!(
            mock.request_body(0),
            json!({ "CATEGORIAS": ["CAT_HERRAMIENTAS", "CAT_TALADROS"] })
        );
    }

    #[test]
    fn test_toggle_off_is_logical_delete() {
        let mock = MockTransport::new();
        block_on(set_active(&client(&mock), "TALADRO-LX1", false)).unwrap();
        assert!(mock.requests()[0].url.contains("ProcessType=DeleteLogic"));
    }

    #[test]
    fn test_session_expired_on_401() {
        let mock = MockTransport::new();
        mock.respond(401, json!({ "message": "token expired" }));
        let result = block_on(fetch_all(&client(&mock)));
        assert_eq!(result, Err(ApiError::SessionExpired));
    }
}
