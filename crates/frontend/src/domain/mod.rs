pub mod a001_product;
pub mod a002_presentation;
pub mod a003_category;
pub mod a004_price_list;
pub mod a005_price_item;
pub mod a006_product_file;
