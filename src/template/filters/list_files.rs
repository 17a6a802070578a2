use std::fmt;
use std::fs;
use std::path::Path;

use liquid::model::Value;
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::runtime::Expression;
use liquid_core::{Error as LiquidError, FilterReflection, Result as LiquidResult, Runtime, ValueView};
use walkdir::WalkDir;

use super::evaluate_flag;
use crate::builder::OutputPaths;
use crate::metadata::{read_metadata_block, Metadata};
use crate::template::convert::file_object;
use crate::utils::path::is_excluded_name;

/// ListFiles filter implementation
#[derive(Debug, Clone)]
pub struct ListFilesFilter {
    paths: OutputPaths,
    with_metadata_only: Option<Expression>,
    recursive: Option<Expression>,
}

impl fmt::Display for ListFilesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list_files")
    }
}

impl liquid_core::Filter for ListFilesFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let relative = input.to_kstr().to_string();
        let directory = self.paths.input_dir().join(relative.trim_start_matches('/'));
        let with_metadata_only = evaluate_flag(self.with_metadata_only.as_ref(), runtime, false)?;
        let recursive = evaluate_flag(self.recursive.as_ref(), runtime, false)?;

        let files = list_files(&self.paths, &directory, with_metadata_only, recursive)?;
        Ok(Value::Array(files))
    }
}

/// List the files below `directory` as template file objects, sorted by path.
/// A missing directory yields an empty list.
fn list_files(
    paths: &OutputPaths,
    directory: &Path,
    with_metadata_only: bool,
    recursive: bool,
) -> LiquidResult<Vec<Value>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_name(entry.file_name()));

    let mut files = Vec::new();
    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }

        let content = fs::read(entry.path()).map_err(|e| {
            LiquidError::with_msg(format!("Couldn't read file {}: {}", entry.path().display(), e))
        })?;
        let metadata = std::str::from_utf8(&content)
            .ok()
            .and_then(read_metadata_block);

        if with_metadata_only && metadata.is_none() {
            continue;
        }

        let output = paths.output_path_for(entry.path());
        let metadata = metadata.unwrap_or_else(Metadata::new);
        files.push(Value::Object(file_object(entry.path(), &output, &metadata, paths)));
    }

    Ok(files)
}

/// Parse filter factory for list_files
#[derive(Debug, Clone)]
pub struct ListFilesFilterParser {
    pub paths: OutputPaths,
}

impl FilterReflection for ListFilesFilterParser {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "Lists the files of a directory below the input root with their metadata and output paths"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for ListFilesFilterParser {
    fn parse(&self, args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        let FilterArguments {
            mut positional,
            mut keyword,
        } = args;

        let with_metadata_only = positional.next();
        let recursive = positional.next();
        if positional.next().is_some() || keyword.next().is_some() {
            return Err(LiquidError::with_msg(
                "list_files takes at most two arguments: with_metadata_only, recursive",
            ));
        }

        Ok(Box::new(ListFilesFilter {
            paths: self.paths.clone(),
            with_metadata_only,
            recursive,
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
