use super::{Description, SchemaRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    Database,
    Api,
    Queue,
    File,
}

/// Defines a data source and its free-form connection settings.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSourceItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(rename = "type")]
    pub source_type: DataSourceType,
    #[serde(default)]
    pub config: Map<String, Value>,
}

/// Defines a service that actions may use by name.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

impl SchemaRecord for ServiceItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn description_text(&self) -> &str {
        Description::text_of(self.description.as_ref())
    }
}

/// Defines an environment variable.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Defines an access-control role.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default)]
    pub permissions: Vec<String>,
}
