//! Presentation service (`productsPresentacionesCRUD`)

use crate::shared::api_utils::{validated, ApiClient, ApiError, DeleteMode, SaveOutcome};
use contracts::domain::a002_presentation::{NewPresentation, Presentation, PresentationForm, ENDPOINT};
use contracts::domain::common::ProcessType;

pub async fn fetch_all(api: &ApiClient) -> Result<Vec<Presentation>, ApiError> {
    api.fetch_all::<Presentation>(&[]).await
}

/// Presentations of one product
pub async fn fetch_by_product(api: &ApiClient, skuid: &str) -> Result<Vec<Presentation>, ApiError> {
    api.list(ENDPOINT, ProcessType::GetBySkuId, &[("skuid", skuid)]).await
}

pub async fn fetch_one(api: &ApiClient, id: &str) -> Result<Presentation, ApiError> {
    api.require_one::<Presentation>(id).await
}

pub async fn create(api: &ApiClient, presentation: &NewPresentation) -> Result<(), ApiError> {
    validated(presentation.validate())?;
    api.add_one::<Presentation, _>(presentation).await.map(|_| ())
}

/// Diff-based update; newly attached files always count as a change
pub async fn update(
    api: &ApiClient,
    id: &str,
    original: &PresentationForm,
    draft: &PresentationForm,
) -> Result<SaveOutcome, ApiError> {
    validated(draft.validate())?;
    api.update_changed::<Presentation, _>(id, original, draft).await
}

pub async fn set_active(api: &ApiClient, id: &str, active: bool) -> Result<(), ApiError> {
    api.set_active::<Presentation>(id, active).await
}

pub async fn delete(api: &ApiClient, id: &str, mode: DeleteMode) -> Result<(), ApiError> {
    api.delete::<Presentation>(id, mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_presentation::draft::PresentationDraft;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_by_product_uses_skuid() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "value": [{ "data": [{ "dataRes": [
                { "IdPresentaOK": "TAL-1-CAJA", "SKUID": "TAL-1", "NOMBREPRESENTACION": "Caja", "CostoIni": "10", "CostoFin": 12 }
            ] }] }] }),
        );
        let list = block_on(fetch_by_product(&client(&mock), "TAL-1")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].cost_initial, 10.0);
        let url = &mock.requests()[0].url;
        assert!(url.contains("ProcessType=GetBySKUID"));
        assert!(url.contains("skuid=TAL-1"));
    }

    #[test]
    fn test_missing_presentation_is_not_found() {
        let mock = MockTransport::new();
        mock.respond(200, json!({ "value": [] }));
        let result = block_on(fetch_one(&client(&mock), "NOPE"));
        assert!(matches!(result, Err(ApiError::Server { status: 404, .. })));
    }

    #[test]
    fn test_create_sends_extra_as_string() {
        let mock = MockTransport::new();
        let mut draft = PresentationDraft::new();
        draft.name = "Kit".into();
        draft.description = "Kit completo".into();
        draft.cost_initial = "100".into();
        draft.cost_final = "150,75".into();
        draft.add_extra_row();
        draft.set_extra_key(0, "voltaje".into());
        draft.set_extra_value(0, "18V".into());
        let payload = draft.to_new_presentation("TAL-1").unwrap();

        block_on(create(&client(&mock), &payload)).unwrap();
        let body = mock.request_body(0);
        assert_eq!(body["IdPresentaOK"], json!("TAL-1-KIT"));
        assert_eq!(body["SKUID"], json!("TAL-1"));
        assert_eq!(body["CostoFin"], json!(150.75));
        assert_eq!(body["PropiedadesExtras"], json!("{\"voltaje\":\"18V\"}"));
        assert_eq!(body["files"], json!([]));
    }

    #[test]
    fn test_update_sends_cost_change_only() {
        let mock = MockTransport::new();
        let original = PresentationForm {
            name: "Caja".into(),
            description: "Caja individual".into(),
            cost_initial: 10.0,
            cost_final: 12.0,
            extra: Default::default(),
            files: Vec::new(),
        };
        let mut draft = original.clone();
        draft.cost_final = 13.5;

        let outcome = block_on(update(&client(&mock), "TAL-1-CAJA", &original, &draft)).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(mock.requests()[0].url.contains("IdPresentaOK=TAL-1-CAJA"));
        assert_eq!(mock.request_body(0), json!({ "CostoFin": 13.5 }));
    }

    #[test]
    fn test_server_error_is_surfaced() {
        let mock = MockTransport::new();
        mock.respond(500, json!({ "messageUSR": "La presentación ya existe" }));
        let mut draft = PresentationDraft::new();
        draft.name = "Caja".into();
        draft.description = "Caja".into();
        let payload = draft.to_new_presentation("TAL-1").unwrap();
        let err = block_on(create(&client(&mock), &payload)).unwrap_err();
        assert_eq!(err.to_string(), "La presentación ya existe");
    }
}
