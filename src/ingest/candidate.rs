//! Candidate recipes: typed fields pulled out of a loosely-typed JSON object.
//!
//! Mandatory fields are checked by the pipeline. Every optional field has a
//! declared default that applies when the field is absent or has the wrong
//! type, so a sloppy file degrades to defaults instead of being rejected.

use serde_json::Value;

use crate::discover::JsonObject;
use crate::model::Requirement;

pub const DEFAULT_AREA_TYPE: i32 = 6;
pub const DEFAULT_REQUIRED_LEVEL: i32 = 1;
pub const DEFAULT_COUNT: i32 = 1;
pub const DEFAULT_PRODUCTION_TIME: f64 = 60.0;
pub const DEFAULT_NEED_FUEL: bool = false;

/// Requirement records with no `resource` key get this, which is always dropped.
const MISSING_RESOURCE: i32 = -1;

/// The scalar fields of a recipe file, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFields {
    pub area_type: i32,
    pub required_level: i32,
    pub count: i32,
    pub production_time: f64,
    pub need_fuel_for_all_production_time: bool,
}

impl CandidateFields {
    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            area_type: int_or(obj, "areaType", DEFAULT_AREA_TYPE),
            required_level: int_or(obj, "requiredLevel", DEFAULT_REQUIRED_LEVEL),
            count: int_or(obj, "count", DEFAULT_COUNT),
            production_time: number_or(obj, "productionTime", DEFAULT_PRODUCTION_TIME),
            need_fuel_for_all_production_time: bool_or(
                obj,
                "needFuelForAllProductionTime",
                DEFAULT_NEED_FUEL,
            ),
        }
    }
}

/// A string field, or `None` if absent, not a string, or blank.
pub fn non_blank_str<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// An integer field that fits in `i32`, or `default`.
fn int_or(obj: &JsonObject, key: &str, default: i32) -> i32 {
    obj.get(key)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(default)
}

fn number_or(obj: &JsonObject, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn bool_or(obj: &JsonObject, key: &str, default: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Object records of an optional array field. Non-object records are skipped.
fn records<'a>(obj: &'a JsonObject, key: &str) -> impl Iterator<Item = &'a JsonObject> {
    obj.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Assemble a recipe's requirement list.
///
/// The area requirement comes first, followed by valid inputs, tools, and
/// resources, each group in file order. Invalid records are dropped.
pub fn build_requirements(
    obj: &JsonObject,
    area_type: i32,
    required_level: i32,
) -> Vec<Requirement> {
    let mut reqs = vec![Requirement::area(area_type, required_level)];

    reqs.extend(
        records(obj, "inputs")
            .filter_map(item_fields)
            .map(|(tpl, count)| Requirement::item(tpl, count)),
    );

    reqs.extend(
        records(obj, "tools")
            .filter_map(item_fields)
            .map(|(tpl, count)| Requirement::tool(tpl, count)),
    );

    reqs.extend(records(obj, "resources").filter_map(|rec| {
        let resource = int_or(rec, "resource", MISSING_RESOURCE);
        let count = int_or(rec, "count", DEFAULT_COUNT);
        (resource >= 0 && count > 0).then(|| Requirement::resource(resource, count))
    }));

    reqs
}

/// Template id and count of an input or tool record, if both are valid.
fn item_fields(rec: &JsonObject) -> Option<(&str, i32)> {
    let tpl = non_blank_str(rec, "tpl")?;
    let count = int_or(rec, "count", DEFAULT_COUNT);
    (count > 0).then_some((tpl, count))
}
