//! Document model.
//!
//! This module contains every schema item kind that can be edited, the
//! aggregate [`AppState`] document, and the [`SchemaRecord`] trait that gives
//! uniform read access to items of different kinds.

mod action;
mod description;
mod entity;
mod resource;
mod seed;
mod view;

pub use action::{
    ActionItem, ActionNode, GroupItem, ParameterItem, ParameterLocation, ResponseFormat,
};
pub use description::{AdvancedDescription, Description, Example};
pub use entity::{
    EntityItem, FieldItem, FieldType, Hooks, ReferentialAction, RelationItem, RelationType,
    ValidationRules, ViaTable,
};
pub use resource::{DataSourceItem, DataSourceType, EnvironmentItem, RoleItem, ServiceItem};
pub use view::{ColumnItem, ComponentItem, ComponentType, RowItem, ViewItem};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display name used when an item has neither a title nor a name.
///
pub const UNNAMED: &str = "Unnamed";

/// Reads a free-form value that is present in the input, `null` included,
/// as `Some`. Combined with `#[serde(default)]` only a missing key is `None`.
///
pub(crate) fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Uniform read access to the identifying and descriptive fields of an item.
///
pub trait SchemaRecord {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Human-facing title. Only services carry one.
    ///
    fn title(&self) -> Option<&str> {
        None
    }

    /// Plain text of the description: the raw string, or the intent of an
    /// advanced description, or empty.
    ///
    fn description_text(&self) -> &str;

    /// Name shown in lists: a non-empty title, else a non-empty name, else
    /// [`UNNAMED`].
    ///
    fn display_name(&self) -> &str {
        match self.title() {
            Some(title) if !title.is_empty() => title,
            _ if !self.name().is_empty() => self.name(),
            _ => UNNAMED,
        }
    }
}

impl<T: SchemaRecord + ?Sized> SchemaRecord for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }

    fn description_text(&self) -> &str {
        (**self).description_text()
    }
}

/// Implements [`SchemaRecord`] for a struct with `id`, `name` and an optional
/// [`Description`].
///
macro_rules! schema_record {
    ($($item:ty),+ $(,)?) => {
        $(
            impl SchemaRecord for $item {
                fn id(&self) -> &str {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn description_text(&self) -> &str {
                    Description::text_of(self.description.as_ref())
                }
            }
        )+
    };
}

schema_record!(EntityItem, ActionItem, DataSourceItem, EnvironmentItem, RoleItem, ViewItem);

/// The six top-level collections of the edited document.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub entities: Vec<EntityItem>,
    pub actions: Vec<ActionNode>,
    pub data_sources: Vec<DataSourceItem>,
    pub services: Vec<ServiceItem>,
    pub environment: Vec<EnvironmentItem>,
    pub access_control: Vec<RoleItem>,
}

impl AppState {
    /// Returns the built-in document used when nothing usable is persisted.
    ///
    pub fn seed() -> AppState {
        seed::initial_data()
    }
}

/// Any item that can be staged for editing or listed in an active collection.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaItem {
    Entity(EntityItem),
    Action(ActionItem),
    Group(GroupItem),
    DataSource(DataSourceItem),
    Service(ServiceItem),
    Environment(EnvironmentItem),
    Role(RoleItem),
}

impl SchemaItem {
    /// Short kind label used in logs and errors.
    ///
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaItem::Entity(_) => "entity",
            SchemaItem::Action(_) => "action",
            SchemaItem::Group(_) => "group",
            SchemaItem::DataSource(_) => "dataSource",
            SchemaItem::Service(_) => "service",
            SchemaItem::Environment(_) => "environment",
            SchemaItem::Role(_) => "role",
        }
    }

    fn record(&self) -> &dyn SchemaRecord {
        match self {
            SchemaItem::Entity(item) => item,
            SchemaItem::Action(item) => item,
            SchemaItem::Group(item) => item,
            SchemaItem::DataSource(item) => item,
            SchemaItem::Service(item) => item,
            SchemaItem::Environment(item) => item,
            SchemaItem::Role(item) => item,
        }
    }

    pub fn set_id(&mut self, id: String) {
        match self {
            SchemaItem::Entity(item) => item.id = id,
            SchemaItem::Action(item) => item.id = id,
            SchemaItem::Group(item) => item.id = id,
            SchemaItem::DataSource(item) => item.id = id,
            SchemaItem::Service(item) => item.id = id,
            SchemaItem::Environment(item) => item.id = id,
            SchemaItem::Role(item) => item.id = id,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            SchemaItem::Entity(item) => item.name = name,
            SchemaItem::Action(item) => item.name = name,
            SchemaItem::Group(item) => item.name = name,
            SchemaItem::DataSource(item) => item.name = name,
            SchemaItem::Service(item) => item.name = name,
            SchemaItem::Environment(item) => item.name = name,
            SchemaItem::Role(item) => item.name = name,
        }
    }

    /// Returns the title slot for kinds that have one.
    ///
    pub fn title_mut(&mut self) -> Option<&mut String> {
        match self {
            SchemaItem::Service(item) => Some(&mut item.title),
            _ => None,
        }
    }
}

impl SchemaRecord for SchemaItem {
    fn id(&self) -> &str {
        self.record().id()
    }

    fn name(&self) -> &str {
        self.record().name()
    }

    fn title(&self) -> Option<&str> {
        self.record().title()
    }

    fn description_text(&self) -> &str {
        self.record().description_text()
    }
}

impl From<ActionNode> for SchemaItem {
    fn from(node: ActionNode) -> Self {
        match node {
            ActionNode::Action(action) => SchemaItem::Action(action),
            ActionNode::Group(group) => SchemaItem::Group(group),
        }
    }
}
