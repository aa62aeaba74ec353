//! Newline-delimited bulk request bodies.

use serde_json::json;

use crate::catalog::Product;
use crate::error::SearchError;

/// Bulk body indexing every product under its id.
///
/// Each product becomes an action line followed by the document line.
pub fn index_body(products: &[Product]) -> Result<String, SearchError> {
    let mut body = String::new();
    for product in products {
        let action = json!({ "index": { "_id": product.id.to_string() } });
        let document =
            serde_json::to_string(product).map_err(|e| SearchError::Encode(e.to_string()))?;
        body.push_str(&action.to_string());
        body.push('\n');
        body.push_str(&document);
        body.push('\n');
    }
    Ok(body)
}

/// Bulk body deleting each id.
pub fn delete_body(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| format!("{}\n", json!({ "delete": { "_id": id.to_string() } })))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_body_pairs() {
        let products = vec![Product::new(1, "A"), Product::new(2, "B")];
        let body = index_body(&products).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"{"index":{"_id":"1"}}"#);
        assert_eq!(lines[2], r#"{"index":{"_id":"2"}}"#);
        let doc: Product = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(doc.name, "B");
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn test_delete_body() {
        let body = delete_body(&[5, 9]);
        assert_eq!(body, "{\"delete\":{\"_id\":\"5\"}}\n{\"delete\":{\"_id\":\"9\"}}\n");
    }

    #[test]
    fn test_empty_bodies() {
        assert_eq!(index_body(&[]).unwrap(), "");
        assert_eq!(delete_body(&[]), "");
    }
}
