use std::fmt::{self, Write};

use chrono::{NaiveDate, NaiveDateTime};
use liquid::model::Value;
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::runtime::Expression;
use liquid_core::{Error as LiquidError, FilterReflection, Result as LiquidResult, Runtime, ValueView};

/// FormatDate filter implementation
#[derive(Debug, Clone)]
pub struct FormatDateFilter {
    format: Expression,
}

impl fmt::Display for FormatDateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "format_date")
    }
}

impl liquid_core::Filter for FormatDateFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();
        let format = self.format.evaluate(runtime)?.to_kstr().to_string();

        match format_date(&date_str, &format) {
            Some(Ok(formatted)) => Ok(Value::scalar(formatted)),
            Some(Err(_)) => Err(LiquidError::with_msg(format!(
                "Invalid date format string: {}",
                format
            ))),
            // If can't parse, return the original string
            None => Ok(Value::scalar(date_str)),
        }
    }
}

/// Format a metadata date (`YYYY-MM-DD`) or date-time (`YYYY-MM-DD HH:MM:SS`)
/// with a strftime pattern. `None` if the input is not a date.
fn format_date(date_str: &str, format: &str) -> Option<Result<String, fmt::Error>> {
    let date_time = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    let mut formatted = String::new();
    Some(write!(formatted, "{}", date_time.format(format)).map(|_| formatted))
}

/// Parse filter factory for format_date
#[derive(Debug, Clone)]
pub struct FormatDateFilterParser;

impl FilterReflection for FormatDateFilterParser {
    fn name(&self) -> &str {
        "format_date"
    }

    fn description(&self) -> &str {
        "Formats a metadata date with a strftime pattern"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for FormatDateFilterParser {
    fn parse(&self, args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        let FilterArguments {
            mut positional,
            mut keyword,
        } = args;

        let format = positional
            .next()
            .ok_or_else(|| LiquidError::with_msg("format_date requires a format string"))?;
        if positional.next().is_some() || keyword.next().is_some() {
            return Err(LiquidError::with_msg("format_date takes a single format argument"));
        }

        Ok(Box::new(FormatDateFilter { format }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
