//! Requirements: what a recipe needs before it can run.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One precondition for producing a recipe's output.
///
/// Tagged by `type` so each requirement is self-describing in the catalog.
/// The area requirement always comes first in a recipe's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Requirement {
    /// The production area and the level it must be upgraded to.
    #[serde(rename_all = "camelCase")]
    Area { area_type: i32, required_level: i32 },

    /// An item consumed by production.
    Item(ItemRequirement),

    /// An item needed during production but returned afterwards.
    Tool(ItemRequirement),

    /// A resource (fuel, water filter charge, ...) drawn during production.
    #[serde(rename_all = "camelCase")]
    Resource { resource: i32, count: i32 },
}

/// Fields shared by item and tool requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequirement {
    pub template_id: String,
    pub count: i32,
    pub is_functional: bool,
    pub is_encoded: bool,
    pub is_spawned_in_session: bool,
}

impl Requirement {
    pub fn area(area_type: i32, required_level: i32) -> Self {
        Self::Area {
            area_type,
            required_level,
        }
    }

    /// A consumed input item.
    pub fn item(template_id: impl Into<String>, count: i32) -> Self {
        Self::Item(ItemRequirement {
            template_id: template_id.into(),
            count,
            is_functional: false,
            is_encoded: false,
            is_spawned_in_session: false,
        })
    }

    /// A tool. Tools must be functional to count.
    pub fn tool(template_id: impl Into<String>, count: i32) -> Self {
        Self::Tool(ItemRequirement {
            template_id: template_id.into(),
            count,
            is_functional: true,
            is_encoded: false,
            is_spawned_in_session: false,
        })
    }

    pub fn resource(resource: i32, count: i32) -> Self {
        Self::Resource { resource, count }
    }
}

/// A requirement as the host catalog stores it.
///
/// Host catalogs carry requirement kinds this crate never builds (quest
/// completion, trader loyalty, ...) and fields it does not model. Anything
/// that does not survive a typed round trip unchanged is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogRequirement {
    Known(Requirement),
    Raw(Map<String, Value>),
}

impl CatalogRequirement {
    pub fn known(&self) -> Option<&Requirement> {
        match self {
            Self::Known(req) => Some(req),
            Self::Raw(_) => None,
        }
    }

    fn classify(map: Map<String, Value>) -> Self {
        let exact = serde_json::from_value::<Requirement>(Value::Object(map.clone()))
            .ok()
            .filter(|req| {
                serde_json::to_value(req).is_ok_and(|typed| typed.as_object() == Some(&map))
            });

        match exact {
            Some(req) => Self::Known(req),
            None => Self::Raw(map),
        }
    }
}

impl<'de> Deserialize<'de> for CatalogRequirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::classify)
    }
}

impl From<Requirement> for CatalogRequirement {
    fn from(req: Requirement) -> Self {
        Self::Known(req)
    }
}

impl PartialEq<Requirement> for CatalogRequirement {
    fn eq(&self, other: &Requirement) -> bool {
        self.known() == Some(other)
    }
}
