use std::fmt;

use eyre::{Result, WrapErr};
use scraper::{ElementRef, Html};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use url::Url;

use crate::markup::{self, selector, text_of};
use crate::PageSource;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// A single specification (key-value pair) of a Product.
pub struct Specification {
    /// The label of the specification, e.g. `Chipset`.
    pub name: String,
    /// The value of the specification.
    pub value: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// Specifications represents a group of specifications.
pub struct Specifications {
    /// The category of the specifications.
    /// For example: `GRAPHICS ENGINE`, `MEMORY`, `POWER` etc.
    pub category: String,
    /// The specifications, in page order.
    pub specifications: Vec<Specification>,
}

impl Specifications {
    /// Adds a row; a label seen before keeps its position and takes the new value.
    fn insert(&mut self, name: String, value: String) {
        match self.specifications.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.value = value,
            None => self.specifications.push(Specification { name, value }),
        }
    }
}

/// Grouped specifications of one product, in page order.
///
/// Serializes as `{ category: { label: value } }`. Every category holds
/// at least one specification.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SpecificationTable(Vec<Specifications>);

impl SpecificationTable {
    /// Fetches the detail page at `url` and parses its specification panels.
    pub async fn fetch(source: &impl PageSource, url: &Url) -> Result<Self> {
        let body = source
            .fetch_page(url)
            .await
            .wrap_err_with(|| format!("could not load detail page {url}"))?;
        Self::parse(&body)
    }

    /// Parses the `panel-heading` / `panel-body` pairs of a detail page.
    pub fn parse(body: &str) -> Result<Self> {
        let heading_selector = &selector(markup::PANEL_HEADING)?;
        let row_selector = &selector(markup::SPEC_ROW)?;
        let label_selector = &selector(markup::SPEC_LABEL)?;
        let value_selector = &selector(markup::SPEC_VALUE)?;

        let document = Html::parse_document(body);
        let mut table = SpecificationTable::default();

        for heading in document.select(heading_selector) {
            let category = heading.text().collect::<String>().trim().to_string();
            // only the very next element counts, and only if it is a panel body
            let Some(panel_body) = heading.next_siblings().find_map(ElementRef::wrap) else {
                continue;
            };
            if !panel_body
                .value()
                .classes()
                .any(|class| class == markup::PANEL_BODY_CLASS)
            {
                continue;
            }

            let mut group = Specifications {
                category,
                specifications: Vec::new(),
            };
            for row in panel_body.select(row_selector) {
                let name = text_of(row, label_selector);
                let value = text_of(row, value_selector);
                if !name.is_empty() && !value.is_empty() {
                    group.insert(name, value);
                }
            }
            table.insert(group);
        }
        debug!(categories = table.len(), "parsed specifications");

        Ok(table)
    }

    /// Adds a group unless it is empty. A repeated category replaces the
    /// earlier one in place.
    fn insert(&mut self, group: Specifications) {
        if group.category.is_empty() || group.specifications.is_empty() {
            return;
        }
        match self.0.iter_mut().find(|g| g.category == group.category) {
            Some(existing) => *existing = group,
            None => self.0.push(group),
        }
    }

    /// Value of `name` within `category`.
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|group| group.category == category)?
            .specifications
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.value.as_str())
    }

    /// Categories in page order.
    pub fn categories(&self) -> impl Iterator<Item = &Specifications> {
        self.0.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no category had any specification.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct Rows<'a>(&'a [Specification]);

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for spec in self.0 {
            map.serialize_entry(&spec.name, &spec.value)?;
        }
        map.end()
    }
}

impl Serialize for SpecificationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(&group.category, &Rows(&group.specifications))?;
        }
        map.end()
    }
}

struct OwnedRows(Vec<Specification>);

impl<'de> Deserialize<'de> for OwnedRows {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowsVisitor;

        impl<'de> Visitor<'de> for RowsVisitor {
            type Value = OwnedRows;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of specification labels to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OwnedRows, A::Error> {
                let mut group = Specifications::default();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    group.insert(name, value);
                }
                Ok(OwnedRows(group.specifications))
            }
        }

        deserializer.deserialize_map(RowsVisitor)
    }
}

impl<'de> Deserialize<'de> for SpecificationTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SpecificationTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of specification categories")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<SpecificationTable, A::Error> {
                let mut table = SpecificationTable::default();
                while let Some((category, rows)) = access.next_entry::<String, OwnedRows>()? {
                    table.insert(Specifications {
                        category,
                        specifications: rows.0,
                    });
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
