use std::path::Path;

use liquid::model::Value;
use liquid::Object;

use crate::builder::OutputPaths;
use crate::metadata::{Metadata, MetadataValue};

/// Convert a metadata value to a Liquid value.
/// Dates become `YYYY-MM-DD` and date-times `YYYY-MM-DD HH:MM:SS` strings.
pub fn metadata_value_to_liquid(value: &MetadataValue) -> Value {
    match value {
        MetadataValue::Bool(value) => Value::scalar(*value),
        MetadataValue::Integer(value) => Value::scalar(*value),
        MetadataValue::Float(value) => Value::scalar(*value),
        MetadataValue::String(value) => Value::scalar(value.clone()),
        MetadataValue::DateTime(_) | MetadataValue::Date(_) => Value::scalar(value.to_string()),
    }
}

pub fn metadata_to_liquid(metadata: &Metadata) -> Object {
    let mut object = Object::new();
    for (key, value) in metadata {
        object.insert(key.clone().into(), metadata_value_to_liquid(value));
    }
    object
}

/// The object templates see for a file: `name`, `input`, `output`,
/// `output_directory`, `url` and `metadata`
pub fn file_object(input: &Path, output: &Path, metadata: &Metadata, paths: &OutputPaths) -> Object {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut object = Object::new();
    object.insert("name".into(), Value::scalar(name));
    object.insert("input".into(), Value::scalar(input.display().to_string()));
    object.insert("output".into(), Value::scalar(output.display().to_string()));
    object.insert("output_directory".into(), Value::scalar(paths.output_directory(output)));
    object.insert("url".into(), Value::scalar(paths.url_for(output)));
    object.insert("metadata".into(), Value::Object(metadata_to_liquid(metadata)));
    object
}
