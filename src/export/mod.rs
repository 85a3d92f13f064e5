//! Export of the edited document as an application-schema JSON file.

mod error;

pub use error::ExportError;

use crate::model::{
    ActionNode, AppState, DataSourceItem, EntityItem, EnvironmentItem, RoleItem, ServiceItem,
};
use crate::utils::ids::timestamp_id;
use log::*;
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

pub const SCHEMA_URI: &str = "https://example.com/schemas/application.json";
pub const APP_NAME: &str = "MyBlueSchemaApp";
pub const APP_VERSION: &str = "1.0.0";
pub const APP_DESCRIPTION: &str = "Generated by BlueSchema Designer";
pub const DEFAULT_FILE_NAME: &str = "application.json";

/// Roles nested under the `accessControl` key.
///
#[derive(Debug, Serialize)]
pub struct AccessControl<'a> {
    pub roles: &'a [RoleItem],
}

/// Envelope written to the export file. Borrows the collections of the
/// document snapshot it was built from.
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub id: String,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub entities: &'a [EntityItem],
    pub actions: &'a [ActionNode],
    pub data_sources: &'a [DataSourceItem],
    pub services: &'a [ServiceItem],
    pub environment: &'a [EnvironmentItem],
    pub access_control: AccessControl<'a>,
}

impl<'a> ExportDocument<'a> {
    /// Wraps the document with fresh metadata.
    ///
    pub fn new(state: &'a AppState) -> ExportDocument<'a> {
        ExportDocument::with_id(state, timestamp_id("app"))
    }

    /// Same as [`ExportDocument::new`] with a fixed document id.
    ///
    pub fn with_id(state: &'a AppState, id: String) -> ExportDocument<'a> {
        ExportDocument {
            schema: SCHEMA_URI,
            id,
            name: APP_NAME,
            version: APP_VERSION,
            description: APP_DESCRIPTION,
            entities: &state.entities,
            actions: &state.actions,
            data_sources: &state.data_sources,
            services: &state.services,
            environment: &state.environment,
            access_control: AccessControl {
                roles: &state.access_control,
            },
        }
    }

    /// Renders the document as JSON indented by two spaces.
    ///
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }
}

/// Writes already rendered export JSON to `file_name` inside `dir_path`,
/// creating the directory if needed. Returns the written path.
///
pub fn write_export(
    dir_path: &Path,
    file_name: &str,
    json: &str,
) -> Result<PathBuf, ExportError> {
    if !dir_path.exists() {
        fs::create_dir_all(dir_path).map_err(|e| ExportError::WriteFailed {
            path: dir_path.to_path_buf(),
            source: e,
        })?;
    }
    let file_path = dir_path.join(file_name);
    let mut file = fs::File::create(&file_path).map_err(|e| ExportError::WriteFailed {
        path: file_path.clone(),
        source: e,
    })?;
    write!(file, "{}", json).map_err(|e| ExportError::WriteFailed {
        path: file_path.clone(),
        source: e,
    })?;
    info!("Exported application schema to {}", file_path.display());
    Ok(file_path)
}
