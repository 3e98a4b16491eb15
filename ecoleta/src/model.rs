//! Records exchanged with the backend and geography APIs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Type of recyclable material a drop-off point accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    /// Identifier of the category.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Url of the category icon.
    pub image_url: String,
}

/// First-level administrative division (state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier of the region.
    pub id: u32,
    /// Short code, e.g. `SC`. This is the value the locality list is scoped by.
    #[serde(rename = "sigla")]
    pub code: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

impl Region {
    /// Text shown in the region selector, e.g. `Santa Catarina ( SC )`.
    pub fn label(&self) -> String {
        format!("{} ( {} )", self.name, self.code)
    }
}

/// Second-level administrative division (city).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    /// Identifier of the locality.
    pub id: u32,
    /// Display name. This is the value submitted with the point.
    #[serde(rename = "nome")]
    pub name: String,
}

/// Registration record of a new drop-off point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPoint {
    /// Name of the entity running the point.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone.
    pub whatsapp: String,
    /// Latitude of the point, absent if the user did not pick a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude of the point, absent if the user did not pick a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Name of the locality.
    pub city: String,
    /// Code of the region.
    pub uf: String,
    /// Identifiers of accepted categories.
    pub items: BTreeSet<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_geography_records() {
        let regions: Vec<Region> = serde_json::from_value(json!([
            {"id": 42, "sigla": "SC", "nome": "Santa Catarina", "regiao": {"id": 4}}
        ]))
        .expect("valid regions");
        assert_eq!(regions[0].code, "SC");
        assert_eq!(regions[0].label(), "Santa Catarina ( SC )");

        let localities: Vec<Locality> =
            serde_json::from_value(json!([{"id": 4204608, "nome": "Criciúma"}]))
                .expect("valid localities");
        assert_eq!(localities[0].name, "Criciúma");
    }

    #[test]
    fn point_without_position_omits_coordinates() {
        let point = NewPoint {
            name: "Recicla".to_string(),
            email: String::new(),
            whatsapp: String::new(),
            latitude: None,
            longitude: None,
            city: "Criciúma".to_string(),
            uf: "SC".to_string(),
            items: [3, 1].into_iter().collect(),
        };

        assert_eq!(
            serde_json::to_value(&point).expect("serializable"),
            json!({
                "name": "Recicla",
                "email": "",
                "whatsapp": "",
                "city": "Criciúma",
                "uf": "SC",
                "items": [1, 3],
            })
        );
    }
}
