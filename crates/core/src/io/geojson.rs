//! GeoJSON reading/writing
//!
//! Maps GeoJSON feature collections onto [`FeatureCollection`]. Property
//! values are converted between `serde_json::Value` and [`AttributeValue`];
//! nested arrays and objects are not representable as attributes and are
//! ignored on read.

use std::fs;
use std::path::Path;

use geojson::feature::Id;
use geojson::{GeoJson, JsonObject};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureCollection};

/// Read a GeoJSON file into a FeatureCollection
pub fn read_geojson<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_geojson(&contents)
}

/// Parse GeoJSON text into a FeatureCollection.
///
/// Same as [`read_geojson`] but operates on an in-memory string instead of
/// a file path.
pub fn parse_geojson(contents: &str) -> Result<FeatureCollection> {
    let gj: GeoJson = contents.parse()?;
    let fc = match gj {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(Error::Other(
                "expected a GeoJSON FeatureCollection".to_string(),
            ))
        }
    };

    let mut collection = FeatureCollection::new();

    for gj_feature in fc.features {
        let geometry = match &gj_feature.geometry {
            Some(g) => Some(geo_types::Geometry::<f64>::try_from(g)?),
            None => None,
        };

        let mut feature = Feature {
            geometry,
            properties: Default::default(),
            id: gj_feature.id.as_ref().map(|id| match id {
                Id::String(s) => s.clone(),
                Id::Number(n) => n.to_string(),
            }),
        };

        if let Some(props) = gj_feature.properties {
            for (key, value) in props {
                if let Some(attr) = attribute_from_json(&value) {
                    feature.set_property(key, attr);
                }
            }
        }

        collection.push(feature);
    }

    Ok(collection)
}

/// Write a FeatureCollection to a GeoJSON file
pub fn write_geojson<P: AsRef<Path>>(path: P, collection: &FeatureCollection) -> Result<()> {
    fs::write(path.as_ref(), to_geojson(collection).to_string())?;
    Ok(())
}

/// Convert a FeatureCollection to a GeoJSON document
pub fn to_geojson(collection: &FeatureCollection) -> GeoJson {
    let features = collection
        .iter()
        .map(|feature| {
            let geometry = feature
                .geometry
                .as_ref()
                .map(|g| geojson::Geometry::new(geojson::Value::from(g)));

            let mut props = JsonObject::new();
            for (key, value) in &feature.properties {
                props.insert(key.clone(), attribute_to_json(value));
            }

            geojson::Feature {
                bbox: None,
                geometry,
                id: feature.id.clone().map(Id::String),
                properties: Some(props),
                foreign_members: None,
            }
        })
        .collect();

    GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn attribute_from_json(value: &Value) -> Option<AttributeValue> {
    match value {
        Value::Null => Some(AttributeValue::Null),
        Value::Bool(b) => Some(AttributeValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(AttributeValue::Int(i))
            } else {
                n.as_f64().map(AttributeValue::Float)
            }
        }
        Value::String(s) => Some(AttributeValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Null => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Int(i) => Value::Number((*i).into()),
        AttributeValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AttributeValue::String(s) => Value::String(s.clone()),
    }
}
