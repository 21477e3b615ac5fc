use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};

use crate::Product;

/// Writes `products` to `path` as pretty-printed JSON, replacing the file.
pub fn write_catalog(path: impl AsRef<Path>, products: &[Product]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(products)?;
    fs::write(path, json).wrap_err_with(|| format!("could not write {}", path.display()))
}

/// Reads a catalog previously written by `write_catalog`.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Product>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).wrap_err_with(|| format!("could not read {}", path.display()))?;
    let products = serde_json::from_str(&json)
        .wrap_err_with(|| format!("{} is not a product catalog", path.display()))?;
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProductSummary, SpecificationTable};
    use tempfile::TempDir;

    fn summary(title: &str, detail_url: Option<&str>) -> ProductSummary {
        ProductSummary {
            brand: "ASUS".into(),
            title: title.into(),
            img_url: "https://www.jib.co.th/img/a.jpg".into(),
            price: "9,990".into(),
            detail_url: detail_url.map(String::from),
        }
    }

    #[test]
    fn uses_importer_field_names() {
        let product = Product {
            summary: summary("RTX 4060", None),
            specifications: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "brand": "ASUS",
                "title": "RTX 4060",
                "imgUrl": "https://www.jib.co.th/img/a.jpg",
                "price": "9,990",
                "detailUrl": null,
                "specifications": null,
            })
        );
    }

    #[test]
    fn read_back_matches_what_was_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vga.json");
        let table = SpecificationTable::parse(
            r#"<div class="panel-heading">MEMORY</div>
               <div class="panel-body"><div class="row bor_top">
                 <div class="quest">Size</div><div class="answer">8 GB</div>
               </div></div>"#,
        )
        .unwrap();
        let products = vec![
            Product {
                summary: summary("RTX 4060", Some("https://www.jib.co.th/p/1")),
                specifications: Some(table),
            },
            Product {
                summary: summary("RX 7600", None),
                specifications: None,
            },
        ];

        write_catalog(&path, &products).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), products);
    }

    #[test]
    fn overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vga.json");
        fs::write(&path, "this is much longer than an empty json array").unwrap();

        write_catalog(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn pretty_prints_with_two_spaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let product = Product {
            summary: summary("RTX 4060", None),
            specifications: None,
        };
        write_catalog(&path, &[product]).unwrap();
        let json = fs::read_to_string(&path).unwrap();
        assert!(json.starts_with("[\n  {\n    \"brand\": \"ASUS\""));
    }
}
