use serde::Serialize;

use shiftstock_inventory::Catalog;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub sections: Vec<SectionResponse>,
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub name: String,
    pub items: Vec<ItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub name: String,
    pub unit: String,
    pub threshold: u32,
    /// Form field name to submit this item's count under.
    pub key: String,
}

pub fn catalog_to_response(catalog: &Catalog) -> CatalogResponse {
    CatalogResponse {
        sections: catalog
            .sections()
            .iter()
            .map(|s| SectionResponse {
                name: s.name().to_string(),
                items: s
                    .entries()
                    .iter()
                    .map(|e| ItemResponse {
                        name: e.name().to_string(),
                        unit: e.unit().to_string(),
                        threshold: e.threshold(),
                        key: e.key().to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
