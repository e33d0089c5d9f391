#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use latexlite::api::{RenderRequest, TemplateData};

use crate::args::TemplateInput;
use crate::client::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(data)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput("value required".into()))
    }
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

/// Parse template data; it must be a JSON object.
pub fn parse_data(raw: &str) -> Result<TemplateData, CliError> {
    serde_json::from_str(raw)
        .map_err(|e| CliError::InvalidInput(format!("data must be a JSON object: {e}")))
}

pub fn read_request(input: TemplateInput) -> Result<RenderRequest, CliError> {
    let template = read_value(input.template, input.template_file)
        .map_err(|err| match err {
            CliError::InvalidInput(_) => {
                CliError::InvalidInput("--template or --template-file is required".into())
            }
            other => other,
        })?;
    let data = match read_opt_value(input.data, input.data_file)? {
        Some(raw) => parse_data(&raw)?,
        None => TemplateData::new(),
    };
    Ok(RenderRequest::new(template, data))
}
