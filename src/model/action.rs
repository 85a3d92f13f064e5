use super::{Description, SchemaRecord, ViewItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an action parameter is read from.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
    Xml,
    Html,
    Text,
}

/// Input parameter of an action.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterItem {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "crate::model::present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema: Option<Value>,
}

/// Defines an endpoint of the application.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterItem>,
    /// Service names, not checked against the services collection.
    #[serde(default)]
    pub use_services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewItem>,
}

/// Named folder of actions and nested groups sharing a route prefix.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub route_suffix: String,
    #[serde(default)]
    pub actions: Vec<ActionNode>,
}

impl SchemaRecord for GroupItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A node of the action forest: a leaf action or a group of further nodes.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActionNode {
    Action(ActionItem),
    Group(GroupItem),
}

impl ActionNode {
    pub fn as_group(&self) -> Option<&GroupItem> {
        match self {
            ActionNode::Group(group) => Some(group),
            ActionNode::Action(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupItem> {
        match self {
            ActionNode::Group(group) => Some(group),
            ActionNode::Action(_) => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionItem> {
        match self {
            ActionNode::Action(action) => Some(action),
            ActionNode::Group(_) => None,
        }
    }

    /// Visits every node of the subtree rooted here, depth first.
    ///
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut ActionNode)) {
        visit(self);
        if let ActionNode::Group(group) = self {
            for child in group.actions.iter_mut() {
                child.walk_mut(visit);
            }
        }
    }

    pub fn set_id(&mut self, id: String) {
        match self {
            ActionNode::Action(action) => action.id = id,
            ActionNode::Group(group) => group.id = id,
        }
    }
}

impl SchemaRecord for ActionNode {
    fn id(&self) -> &str {
        match self {
            ActionNode::Action(action) => action.id(),
            ActionNode::Group(group) => group.id(),
        }
    }

    fn name(&self) -> &str {
        match self {
            ActionNode::Action(action) => action.name(),
            ActionNode::Group(group) => group.name(),
        }
    }

    fn description_text(&self) -> &str {
        match self {
            ActionNode::Action(action) => action.description_text(),
            ActionNode::Group(group) => group.description_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(id: &str) -> ActionItem {
        ActionItem {
            id: id.to_string(),
            name: format!("action_{}", id),
            description: None,
            route: None,
            parameters: vec![],
            use_services: vec![],
            response_format: None,
            access: vec![],
            view: None,
        }
    }

    fn group(id: &str, actions: Vec<ActionNode>) -> GroupItem {
        GroupItem {
            id: id.to_string(),
            name: format!("group_{}", id),
            description: None,
            route_suffix: format!("/{}", id),
            actions,
        }
    }

    #[test]
    fn null_parameter_schema_survives_inside_a_tagged_node() {
        let mut item = action("a1");
        item.parameters.push(ParameterItem {
            name: "cursor".to_string(),
            location: ParameterLocation::Query,
            description: None,
            required: false,
            schema: Some(Value::Null),
        });
        let node = ActionNode::Group(group("g1", vec![ActionNode::Action(item)]));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(serde_json::from_str::<ActionNode>(&json).unwrap(), node);
    }

    #[test]
    fn nodes_carry_explicit_kind() {
        let node = ActionNode::Group(group("g1", vec![ActionNode::Action(action("a1"))]));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "group");
        assert_eq!(json["routeSuffix"], "/g1");
        assert_eq!(json["actions"][0]["kind"], "action");
        assert_eq!(json["actions"][0]["useServices"], serde_json::json!([]));
    }

    #[test]
    fn parameter_location_serializes_as_in() {
        let parameter = ParameterItem {
            name: "email".to_string(),
            location: ParameterLocation::Query,
            description: None,
            required: true,
            schema: None,
        };
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["in"], "query");
        assert!(json.get("schema").is_none());
    }

    #[test]
    fn walk_mut_visits_whole_subtree() {
        let mut node = ActionNode::Group(group(
            "g1",
            vec![
                ActionNode::Action(action("a1")),
                ActionNode::Group(group("g2", vec![ActionNode::Action(action("a2"))])),
            ],
        ));
        let mut seen = vec![];
        node.walk_mut(&mut |n| seen.push(n.id().to_string()));
        assert_eq!(seen, vec!["g1", "a1", "g2", "a2"]);
    }

    #[test]
    fn accessors_distinguish_kinds() {
        let leaf = ActionNode::Action(action("a1"));
        assert!(leaf.as_group().is_none());
        assert_eq!(leaf.as_action().map(|a| a.id.as_str()), Some("a1"));

        let mut folder = ActionNode::Group(group("g1", vec![]));
        folder.as_group_mut().unwrap().name = "renamed".to_string();
        assert_eq!(folder.name(), "renamed");
    }
}
