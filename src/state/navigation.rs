//! Navigation-related state types.
//!
//! This module contains the top-level categories of the document and the
//! path-based navigation of the action tree.

use crate::model::ActionNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Specifying the six top-level collections.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Entities,
    Actions,
    DataSources,
    Services,
    Environment,
    AccessControl,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Entities,
        Category::Actions,
        Category::DataSources,
        Category::Services,
        Category::Environment,
        Category::AccessControl,
    ];

    /// Returns the wire name of the category.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entities => "entities",
            Category::Actions => "actions",
            Category::DataSources => "dataSources",
            Category::Services => "services",
            Category::Environment => "environment",
            Category::AccessControl => "accessControl",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the wire name, case-insensitively, plus a few short aliases.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entities" | "entity" => Ok(Category::Entities),
            "actions" | "action" => Ok(Category::Actions),
            "datasources" | "data-sources" | "datasource" => Ok(Category::DataSources),
            "services" | "service" => Ok(Category::Services),
            "environment" | "env" => Ok(Category::Environment),
            "accesscontrol" | "access-control" | "roles" => Ok(Category::AccessControl),
            _ => Err(format!("Unknown category '{}'", s)),
        }
    }
}

/// Ordered group ids leading from the root of the action forest to the
/// level currently shown.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ActionPath {
    segments: Vec<String>,
}

impl ActionPath {
    pub fn new() -> ActionPath {
        ActionPath::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Descends into a group. The id is not checked; an unknown id resolves
    /// to an empty level.
    ///
    pub fn navigate_to(&mut self, group_id: &str) -> &mut Self {
        self.segments.push(group_id.to_string());
        self
    }

    /// Replaces the whole path.
    ///
    pub fn set(&mut self, segments: Vec<String>) -> &mut Self {
        self.segments = segments;
        self
    }

    /// Keeps only the first `len` segments, moving back up the tree.
    ///
    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.segments.truncate(len);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.segments.clear();
        self
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

impl FromStr for ActionPath {
    type Err = String;

    /// Parses `g1/g2` (leading and trailing slashes optional).
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ActionPath {
            segments: s
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Returns the nodes at the level reached by following `path` from `forest`.
/// A segment that names no group at its level yields an empty level.
///
pub fn resolve<'a>(forest: &'a [ActionNode], path: &[String]) -> &'a [ActionNode] {
    let mut level = forest;
    for group_id in path {
        match find_group(level, group_id) {
            Some(actions) => level = actions,
            None => return &[],
        }
    }
    level
}

fn find_group<'a>(level: &'a [ActionNode], group_id: &str) -> Option<&'a [ActionNode]> {
    level.iter().find_map(|node| match node {
        ActionNode::Group(group) if group.id == group_id => Some(group.actions.as_slice()),
        _ => None,
    })
}

/// Mutable counterpart of [`resolve`]. Returns `None` when the path does not
/// resolve, since there is no list to mutate.
///
pub fn resolve_mut<'a>(
    forest: &'a mut Vec<ActionNode>,
    path: &[String],
) -> Option<&'a mut Vec<ActionNode>> {
    let mut level = forest;
    for group_id in path {
        level = level.iter_mut().find_map(|node| match node {
            ActionNode::Group(group) if group.id == *group_id => Some(&mut group.actions),
            _ => None,
        })?;
    }
    Some(level)
}
