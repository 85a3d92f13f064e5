use super::Description;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Table,
    List,
    Card,
    CardWithIcon,
    MenuHorizontal,
    MenuVertical,
}

/// Widget placed in a view column. Type-specific settings are kept as-is.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnItem {
    pub id: String,
    pub width: f64,
    #[serde(default)]
    pub components: Vec<ComponentItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowItem {
    pub id: String,
    #[serde(default)]
    pub columns: Vec<ColumnItem>,
}

/// Layout attached to an action: rows of columns of components.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default)]
    pub rows: Vec<RowItem>,
}
