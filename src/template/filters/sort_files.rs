use std::cmp::Ordering;
use std::fmt;

use liquid::model::{ScalarCow, Value};
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::runtime::Expression;
use liquid_core::{Error as LiquidError, FilterReflection, Result as LiquidResult, Runtime, ValueView};

use super::evaluate_flag;

/// SortFiles filter implementation
#[derive(Debug, Clone)]
pub struct SortFilesFilter {
    field: Expression,
    ascending: Option<Expression>,
}

impl fmt::Display for SortFilesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sort_files")
    }
}

impl liquid_core::Filter for SortFilesFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let field = self.field.evaluate(runtime)?.to_kstr().to_string();
        let ascending = evaluate_flag(self.ascending.as_ref(), runtime, true)?;

        let array = input
            .as_array()
            .ok_or_else(|| LiquidError::with_msg("sort_files expects an array of files"))?;
        let mut files: Vec<Value> = array.values().map(|file| file.to_value()).collect();

        files.sort_by(|a, b| {
            let ordering = compare_fields(metadata_field(a, &field), metadata_field(b, &field));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        Ok(Value::Array(files))
    }
}

fn metadata_field<'v>(file: &'v Value, field: &str) -> Option<&'v Value> {
    let Value::Object(file) = file else {
        return None;
    };
    match file.get("metadata")? {
        Value::Object(metadata) => metadata.get(field),
        _ => None,
    }
}

/// Files without the field sort first; values of different types compare equal
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Scalar(a)), Some(Value::Scalar(b))) => compare_scalars(a, b),
        (Some(_), Some(_)) => Ordering::Equal,
    }
}

fn compare_scalars(a: &ScalarCow<'_>, b: &ScalarCow<'_>) -> Ordering {
    if a.type_name() != b.type_name() {
        return Ordering::Equal;
    }

    if let (Some(a), Some(b)) = (a.to_bool(), b.to_bool()) {
        return a.cmp(&b);
    }

    if a.type_name() != "string" {
        if let (Some(a), Some(b)) = (a.to_float(), b.to_float()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
    }

    a.to_kstr().as_str().cmp(b.to_kstr().as_str())
}

/// Parse filter factory for sort_files
#[derive(Debug, Clone)]
pub struct SortFilesFilterParser;

impl FilterReflection for SortFilesFilterParser {
    fn name(&self) -> &str {
        "sort_files"
    }

    fn description(&self) -> &str {
        "Sorts a list of files by a metadata field"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for SortFilesFilterParser {
    fn parse(&self, args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        let FilterArguments {
            mut positional,
            mut keyword,
        } = args;

        let field = positional
            .next()
            .ok_or_else(|| LiquidError::with_msg("sort_files requires a metadata field name"))?;
        let ascending = positional.next();
        if positional.next().is_some() || keyword.next().is_some() {
            return Err(LiquidError::with_msg(
                "sort_files takes at most two arguments: field, ascending",
            ));
        }

        Ok(Box::new(SortFilesFilter { field, ascending }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_fields_missing_first() {
        let one = Value::scalar(1i64);
        assert_eq!(compare_fields(None, Some(&one)), Ordering::Less);
        assert_eq!(compare_fields(Some(&one), None), Ordering::Greater);
        assert_eq!(compare_fields(None, None), Ordering::Equal);
    }

    #[test]
    fn test_compare_fields_same_type() {
        let two = Value::scalar(2i64);
        let ten = Value::scalar(10i64);
        assert_eq!(compare_fields(Some(&two), Some(&ten)), Ordering::Less);

        let early = Value::scalar("2023-01-01");
        let late = Value::scalar("2024-01-01");
        assert_eq!(compare_fields(Some(&late), Some(&early)), Ordering::Greater);
    }

    #[test]
    fn test_compare_fields_mixed_types_equal() {
        let number = Value::scalar(2i64);
        let text = Value::scalar("abc");
        assert_eq!(compare_fields(Some(&number), Some(&text)), Ordering::Equal);
    }
}
