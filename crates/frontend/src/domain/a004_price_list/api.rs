//! Price list service (`preciosListasCRUD`)

use crate::shared::api_utils::{validated, ApiClient, ApiError, DeleteMode, SaveOutcome};
use contracts::domain::a004_price_list::{PriceList, PriceListForm};

pub async fn fetch_all(api: &ApiClient) -> Result<Vec<PriceList>, ApiError> {
    api.fetch_all::<PriceList>(&[]).await
}

pub async fn fetch_one(api: &ApiClient, list_id: &str) -> Result<PriceList, ApiError> {
    api.require_one::<PriceList>(list_id).await
}

pub async fn create(api: &ApiClient, form: &PriceListForm) -> Result<(), ApiError> {
    validated(form.validate())?;
    api.add_one::<PriceList, _>(form).await.map(|_| ())
}

pub async fn update(
    api: &ApiClient,
    list_id: &str,
    original: &PriceListForm,
    draft: &PriceListForm,
) -> Result<SaveOutcome, ApiError> {
    validated(draft.validate())?;
    api.update_changed::<PriceList, _>(list_id, original, draft).await
}

pub async fn set_active(api: &ApiClient, list_id: &str, active: bool) -> Result<(), ApiError> {
    api.set_active::<PriceList>(list_id, active).await
}

pub async fn delete(api: &ApiClient, list_id: &str, mode: DeleteMode) -> Result<(), ApiError> {
    api.delete::<PriceList>(list_id, mode).await
}
