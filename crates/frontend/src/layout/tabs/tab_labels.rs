//! Tab keys and titles.
//!
//! Static tabs use the aggregate's `list_name`; per-record tabs carry the
//! record key after a fixed prefix.

use contracts::domain::a001_product::Product;
use contracts::domain::a003_category::Category;
use contracts::domain::a004_price_list::PriceList;
use contracts::domain::common::AggregateRoot;

pub const PRODUCTS_TAB: &str = "a001_product";
pub const PRODUCT_WIZARD_TAB: &str = "a001_product_wizard";
pub const CATEGORIES_TAB: &str = "a003_category";
pub const PRICE_LISTS_TAB: &str = "a004_price_list";

pub const PRESENTATIONS_TAB_PREFIX: &str = "a002_presentation_list_";
pub const PRICE_ITEMS_TAB_PREFIX: &str = "a005_price_item_list_";

pub fn presentations_tab_key(skuid: &str) -> String {
    format!("{PRESENTATIONS_TAB_PREFIX}{skuid}")
}

pub fn price_items_tab_key(list_id: &str) -> String {
    format!("{PRICE_ITEMS_TAB_PREFIX}{list_id}")
}

/// Readable tab title for a key. Unknown keys are shown as is.
pub fn tab_label_for_key(key: &str) -> String {
    match key {
        PRODUCTS_TAB => Product::list_name().to_string(),
        PRODUCT_WIZARD_TAB => "Nuevo producto".to_string(),
        CATEGORIES_TAB => Category::list_name().to_string(),
        PRICE_LISTS_TAB => PriceList::list_name().to_string(),
        k => {
            if let Some(skuid) = k.strip_prefix(PRESENTATIONS_TAB_PREFIX) {
                format!("Presentaciones · {skuid}")
            } else if let Some(list_id) = k.strip_prefix(PRICE_ITEMS_TAB_PREFIX) {
                format!("Precios · {list_id}")
            } else {
                k.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key(PRODUCTS_TAB), "Productos");
        assert_eq!(tab_label_for_key(PRODUCT_WIZARD_TAB), "Nuevo producto");
        assert_eq!(
            tab_label_for_key(&presentations_tab_key("TALADRO-LX1")),
            "Presentaciones · TALADRO-LX1"
        );
        assert_eq!(tab_label_for_key(&price_items_tab_key("LISTA-2024")), "Precios · LISTA-2024");
        assert_eq!(tab_label_for_key("zzz"), "zzz");
    }
}
