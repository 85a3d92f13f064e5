//! Create, update, delete and duplicate over the active list.
//!
//! The active list is one of the top-level collections, or one level of the
//! action tree. [`ActiveList`] borrows it mutably so every operation works the
//! same way whatever the item kind.

use super::error::StateError;
use super::navigation::Category;
use crate::model::{
    ActionNode, DataSourceItem, EntityItem, EnvironmentItem, RoleItem, SchemaItem, SchemaRecord,
    ServiceItem,
};
use crate::utils::ids::IdGenerator;

/// How an item is put into a list.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Placement {
    /// Replace the item with the same id in place, else append.
    Upsert,
    /// Always append.
    Append,
}

/// Mutable borrow of the list the editor currently works on.
///
pub enum ActiveList<'a> {
    Entities(&'a mut Vec<EntityItem>),
    Actions(&'a mut Vec<ActionNode>),
    DataSources(&'a mut Vec<DataSourceItem>),
    Services(&'a mut Vec<ServiceItem>),
    Environment(&'a mut Vec<EnvironmentItem>),
    AccessControl(&'a mut Vec<RoleItem>),
}

impl<'a> ActiveList<'a> {
    pub fn category(&self) -> Category {
        match self {
            ActiveList::Entities(_) => Category::Entities,
            ActiveList::Actions(_) => Category::Actions,
            ActiveList::DataSources(_) => Category::DataSources,
            ActiveList::Services(_) => Category::Services,
            ActiveList::Environment(_) => Category::Environment,
            ActiveList::AccessControl(_) => Category::AccessControl,
        }
    }

    /// Puts the item into the list. Fails without touching the list when the
    /// item kind does not belong to the list's category.
    ///
    pub fn insert(self, item: SchemaItem, placement: Placement) -> Result<(), StateError> {
        let category = self.category();
        match (self, item) {
            (ActiveList::Entities(list), SchemaItem::Entity(item)) => place(list, item, placement),
            (ActiveList::Actions(list), SchemaItem::Action(item)) => {
                place(list, ActionNode::Action(item), placement)
            }
            (ActiveList::Actions(list), SchemaItem::Group(item)) => {
                place(list, ActionNode::Group(item), placement)
            }
            (ActiveList::DataSources(list), SchemaItem::DataSource(item)) => {
                place(list, item, placement)
            }
            (ActiveList::Services(list), SchemaItem::Service(item)) => place(list, item, placement),
            (ActiveList::Environment(list), SchemaItem::Environment(item)) => {
                place(list, item, placement)
            }
            (ActiveList::AccessControl(list), SchemaItem::Role(item)) => {
                place(list, item, placement)
            }
            (_, item) => {
                return Err(StateError::KindMismatch {
                    kind: item.kind(),
                    category,
                })
            }
        }
        Ok(())
    }

    /// Removes the first item with the given id. Returns whether one was found.
    ///
    pub fn remove(self, id: &str) -> bool {
        match self {
            ActiveList::Entities(list) => remove(list, id),
            ActiveList::Actions(list) => remove(list, id),
            ActiveList::DataSources(list) => remove(list, id),
            ActiveList::Services(list) => remove(list, id),
            ActiveList::Environment(list) => remove(list, id),
            ActiveList::AccessControl(list) => remove(list, id),
        }
    }
}

fn place<T: SchemaRecord>(list: &mut Vec<T>, item: T, placement: Placement) {
    let existing = match placement {
        Placement::Upsert => list.iter().position(|i| i.id() == item.id()),
        Placement::Append => None,
    };
    match existing {
        Some(index) => list[index] = item,
        None => list.push(item),
    }
}

fn remove<T: SchemaRecord>(list: &mut Vec<T>, id: &str) -> bool {
    match list.iter().position(|i| i.id() == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// Returns a deep copy of `item` with a fresh id and "Copy" appended to its
/// name (and " Copy" to its title). Every node below a duplicated group gets
/// a fresh id as well.
///
pub fn duplicate(item: &SchemaItem, ids: &mut IdGenerator) -> SchemaItem {
    let mut copy = item.clone();
    copy.set_id(ids.next_id("copy"));
    copy.set_name(format!("{}Copy", item.name()));
    if let Some(title) = copy.title_mut() {
        if !title.is_empty() {
            title.push_str(" Copy");
        }
    }
    if let SchemaItem::Group(group) = &mut copy {
        for child in group.actions.iter_mut() {
            child.walk_mut(&mut |node: &mut ActionNode| node.set_id(ids.next_id("copy")));
        }
    }
    copy
}
