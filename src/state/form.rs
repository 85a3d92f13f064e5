//! Form editing state types.
//!
//! This module contains the kinds of items a form can create and the
//! placeholder values new items start with.

use super::navigation::Category;
use crate::model::{
    ActionItem, DataSourceItem, DataSourceType, Description, EntityItem, EnvironmentItem,
    GroupItem, Hooks, ResponseFormat, RoleItem, SchemaItem, ServiceItem,
};
use serde_json::Map;

/// Specifying what to create inside the action tree. Ignored for other
/// categories.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum NewItemKind {
    #[default]
    Action,
    Group,
}

pub const NEW_ITEM_NAME: &str = "NewItem";

/// Builds the placeholder item a create form starts from.
///
pub fn placeholder_item(category: Category, kind: NewItemKind, id: String) -> SchemaItem {
    let name = NEW_ITEM_NAME.to_string();
    let description = Some(Description::Text(String::new()));
    match category {
        Category::Entities => SchemaItem::Entity(EntityItem {
            id,
            name,
            description,
            table_name: "new_table".to_string(),
            fields: vec![],
            relations: vec![],
            timestamps: true,
            soft_deletes: false,
            hooks: Some(Hooks::default()),
        }),
        Category::Actions => match kind {
            NewItemKind::Group => SchemaItem::Group(GroupItem {
                id,
                name,
                description: Some(String::new()),
                route_suffix: "/new_group".to_string(),
                actions: vec![],
            }),
            NewItemKind::Action => SchemaItem::Action(ActionItem {
                id,
                name,
                description,
                route: Some(String::new()),
                parameters: vec![],
                use_services: vec![],
                response_format: Some(ResponseFormat::Json),
                access: vec![],
                view: None,
            }),
        },
        Category::DataSources => SchemaItem::DataSource(DataSourceItem {
            id,
            name,
            description,
            source_type: DataSourceType::Database,
            config: Map::new(),
        }),
        Category::Services => SchemaItem::Service(ServiceItem {
            id,
            name,
            title: "New Service".to_string(),
            description: Some("Service description...".into()),
        }),
        Category::Environment => SchemaItem::Environment(EnvironmentItem {
            id,
            name,
            description,
            required: true,
            default: Some(String::new()),
        }),
        Category::AccessControl => SchemaItem::Role(RoleItem {
            id,
            name,
            description,
            permissions: vec![],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaRecord;

    #[test]
    fn test_new_item_kind_default() {
        assert_eq!(NewItemKind::default(), NewItemKind::Action);
        assert_ne!(NewItemKind::Action, NewItemKind::Group);
    }

    #[test]
    fn test_placeholder_per_category() {
        let kinds: Vec<&str> = Category::ALL
            .iter()
            .map(|c| placeholder_item(*c, NewItemKind::Action, "new_1".to_string()).kind())
            .collect();
        assert_eq!(
            kinds,
            vec!["entity", "action", "dataSource", "service", "environment", "role"]
        );
    }

    #[test]
    fn test_placeholder_group() {
        let item = placeholder_item(Category::Actions, NewItemKind::Group, "new_2".to_string());
        match item {
            SchemaItem::Group(group) => {
                assert_eq!(group.route_suffix, "/new_group");
                assert!(group.actions.is_empty());
            }
            other => panic!("expected group, got {}", other.kind()),
        }
    }

    #[test]
    fn test_placeholder_entity_defaults() {
        match placeholder_item(Category::Entities, NewItemKind::Group, "new_3".to_string()) {
            SchemaItem::Entity(entity) => {
                assert_eq!(entity.name, NEW_ITEM_NAME);
                assert_eq!(entity.table_name, "new_table");
                assert!(entity.timestamps);
                assert!(!entity.soft_deletes);
                assert_eq!(entity.hooks, Some(Hooks::default()));
            }
            other => panic!("expected entity, got {}", other.kind()),
        }
    }

    #[test]
    fn test_placeholder_service_has_title() {
        let item = placeholder_item(Category::Services, NewItemKind::Action, "new_4".to_string());
        assert_eq!(item.display_name(), "New Service");
        assert_eq!(item.description_text(), "Service description...");
    }
}
