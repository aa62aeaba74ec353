//! Indexed document field names.

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const SUB_TITLE: &str = "subTitle";
pub const KEYWORDS: &str = "keywords";
pub const BRAND_ID: &str = "brandId";
pub const BRAND_NAME: &str = "brandName";
pub const PRODUCT_CATEGORY_ID: &str = "productCategoryId";
pub const PRODUCT_CATEGORY_NAME: &str = "productCategoryName";
pub const PRICE: &str = "price";
pub const SALE: &str = "sale";

/// Nested attribute value sub-documents.
pub const ATTR_VALUE_LIST: &str = "attrValueList";
pub const ATTR_TYPE: &str = "attrValueList.type";
pub const ATTR_ID: &str = "attrValueList.productAttributeId";
pub const ATTR_VALUE: &str = "attrValueList.value";
pub const ATTR_NAME: &str = "attrValueList.name";

/// Text fields matched by keyword searches.
pub const TEXT_FIELDS: [&str; 3] = [NAME, SUB_TITLE, KEYWORDS];
