//! Product and attribute value types.
//!
//! Field names follow the indexed document (`camelCase`). Decoding is lenient:
//! unknown fields are ignored and missing or `null` fields take the zero value.

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttributeType {
    /// Selectable specification (e.g., color, size).
    #[default]
    Specification,
    /// Descriptive parameter (e.g., screen size).
    Parameter,
}

impl AttributeType {
    /// Discriminator stored in the index.
    pub fn code(&self) -> i32 {
        match self {
            AttributeType::Specification => 0,
            AttributeType::Parameter => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(AttributeType::Specification),
            1 => Some(AttributeType::Parameter),
            _ => None,
        }
    }
}

/// A single attribute value of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeValue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Owning product (back-reference).
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: i64,
    /// Attribute definition this value belongs to.
    #[serde(deserialize_with = "null_as_default")]
    pub product_attribute_id: i64,
    /// Raw discriminator, see [`AttributeType`].
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub attr_type: i32,
    /// Attribute display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Attribute display value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

impl AttributeValue {
    /// Create a new attribute value.
    pub fn new(
        id: i64,
        product_attribute_id: i64,
        kind: AttributeType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id,
            product_id: 0,
            product_attribute_id,
            attr_type: kind.code(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Typed kind, `None` for unknown discriminators.
    pub fn kind(&self) -> Option<AttributeType> {
        AttributeType::from_code(self.attr_type)
    }
}

/// A product document in the search index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Unique product identifier, also the document id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub product_sn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_category_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub product_category_name: String,
    /// Picture URL.
    #[serde(deserialize_with = "null_as_default")]
    pub pic: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    /// Units sold.
    #[serde(deserialize_with = "null_as_default")]
    pub sale: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub new_status: i32,
    #[serde(
        rename = "recommandStatus",
        alias = "recommendStatus",
        deserialize_with = "null_as_default"
    )]
    pub recommend_status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub promotion_type: i32,
    /// Manual sort weight.
    #[serde(deserialize_with = "null_as_default")]
    pub sort: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub attr_value_list: Vec<AttributeValue>,
}

impl Product {
    /// Create a product with an id and name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, id: i64, name: impl Into<String>) -> Self {
        self.brand_id = id;
        self.brand_name = name.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, id: i64, name: impl Into<String>) -> Self {
        self.product_category_id = id;
        self.product_category_name = name.into();
        self
    }

    /// Set the subtitle.
    pub fn with_sub_title(mut self, sub_title: impl Into<String>) -> Self {
        self.sub_title = sub_title.into();
        self
    }

    /// Set the search keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Append an attribute value, taking ownership of it.
    pub fn with_attr_value(mut self, mut value: AttributeValue) -> Self {
        value.product_id = self.id;
        self.attr_value_list.push(value);
        self
    }

    /// Attribute values of the given kind.
    pub fn attr_values_of(&self, kind: AttributeType) -> impl Iterator<Item = &AttributeValue> {
        self.attr_value_list
            .iter()
            .filter(move |v| v.kind() == Some(kind))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
