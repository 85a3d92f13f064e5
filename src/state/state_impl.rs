use crate::export::{write_export, ExportDocument, ExportError, DEFAULT_FILE_NAME};
use crate::model::{ActionNode, AppState, SchemaItem, SchemaRecord, ViewItem};
use crate::store::Persistence;
use crate::utils::{ids::IdGenerator, search};
use log::*;
use std::path::{Path, PathBuf};

use super::collection::{duplicate, ActiveList, Placement};
use super::error::StateError;
use super::form::{placeholder_item, NewItemKind};
use super::navigation::{resolve, resolve_mut, ActionPath, Category};

/// Houses the edited document and the state of the edit session.
///
/// Every operation that changes the document writes the whole document
/// through the persistence adapter before returning.
pub struct State {
    document: AppState,
    persistence: Persistence,
    ids: IdGenerator,
    active_category: Category,
    action_path: ActionPath,
    search_query: String,
    selected_item_id: Option<String>,
    is_editing: bool,
    is_json_view: bool,
    is_view_builder_open: bool,
    edit_target: Option<SchemaItem>, // Item staged in the edit form, at most one
    generated_json: String,
    export_file_name: String,
}

impl State {
    /// Returns a new session over the document loaded from `persistence`.
    ///
    pub fn new(persistence: Persistence) -> Self {
        let document = persistence.load();
        State {
            document,
            persistence,
            ids: IdGenerator::new(),
            active_category: Category::Entities,
            action_path: ActionPath::new(),
            search_query: String::new(),
            selected_item_id: None,
            is_editing: false,
            is_json_view: false,
            is_view_builder_open: false,
            edit_target: None,
            generated_json: String::new(),
            export_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Sets the file name used by [`State::download_json`].
    ///
    pub fn with_export_file_name(mut self, file_name: &str) -> Self {
        self.export_file_name = file_name.to_string();
        self
    }

    pub fn document(&self) -> &AppState {
        &self.document
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn set_active_category(&mut self, category: Category) -> &mut Self {
        debug!("Switching to category {}", category);
        self.active_category = category;
        self
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: &str) -> &mut Self {
        self.search_query = query.to_string();
        self
    }

    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item_id.as_deref()
    }

    pub fn select_item(&mut self, id: Option<String>) -> &mut Self {
        self.selected_item_id = id;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_json_view(&self) -> bool {
        self.is_json_view
    }

    pub fn is_view_builder_open(&self) -> bool {
        self.is_view_builder_open
    }

    pub fn generated_json(&self) -> &str {
        &self.generated_json
    }

    pub fn action_path(&self) -> &ActionPath {
        &self.action_path
    }

    /// Descends into a group of the current action level.
    ///
    pub fn navigate_to_group(&mut self, group_id: &str) -> &mut Self {
        self.action_path.navigate_to(group_id);
        debug!("Action path is now {}", self.action_path);
        self
    }

    /// Replaces the action path, e.g. to go back up to an ancestor.
    ///
    pub fn set_action_path(&mut self, segments: Vec<String>) -> &mut Self {
        self.action_path.set(segments);
        self
    }

    /// Returns the action tree level the path points at, or nothing when the
    /// active category is not actions.
    ///
    pub fn current_actions(&self) -> &[ActionNode] {
        if self.active_category != Category::Actions {
            return &[];
        }
        resolve(&self.document.actions, self.action_path.segments())
    }

    /// Returns every item of the active list.
    ///
    pub fn active_items(&self) -> Vec<SchemaItem> {
        let document = &self.document;
        match self.active_category {
            Category::Entities => document
                .entities
                .iter()
                .cloned()
                .map(SchemaItem::Entity)
                .collect(),
            Category::Actions => self
                .current_actions()
                .iter()
                .cloned()
                .map(SchemaItem::from)
                .collect(),
            Category::DataSources => document
                .data_sources
                .iter()
                .cloned()
                .map(SchemaItem::DataSource)
                .collect(),
            Category::Services => document
                .services
                .iter()
                .cloned()
                .map(SchemaItem::Service)
                .collect(),
            Category::Environment => document
                .environment
                .iter()
                .cloned()
                .map(SchemaItem::Environment)
                .collect(),
            Category::AccessControl => document
                .access_control
                .iter()
                .cloned()
                .map(SchemaItem::Role)
                .collect(),
        }
    }

    /// Returns the items of the active list matching the search query.
    ///
    pub fn filtered_items(&self) -> Vec<SchemaItem> {
        search::filter(&self.active_items(), &self.search_query)
    }

    /// Returns a copy of the item with the given id in the active list.
    ///
    pub fn find_item(&self, id: &str) -> Option<SchemaItem> {
        self.active_items().into_iter().find(|item| item.id() == id)
    }

    fn active_list(&mut self) -> Result<ActiveList<'_>, StateError> {
        let document = &mut self.document;
        let list = match self.active_category {
            Category::Entities => ActiveList::Entities(&mut document.entities),
            Category::Actions => {
                match resolve_mut(&mut document.actions, self.action_path.segments()) {
                    Some(level) => ActiveList::Actions(level),
                    None => {
                        return Err(StateError::UnresolvedActionPath(
                            self.action_path.to_string(),
                        ))
                    }
                }
            }
            Category::DataSources => ActiveList::DataSources(&mut document.data_sources),
            Category::Services => ActiveList::Services(&mut document.services),
            Category::Environment => ActiveList::Environment(&mut document.environment),
            Category::AccessControl => ActiveList::AccessControl(&mut document.access_control),
        };
        Ok(list)
    }

    fn persist(&mut self) {
        if !self.persistence.save(&self.document) {
            warn!("Keeping unsaved changes in memory for this session");
        }
    }

    pub fn edit_target(&self) -> Option<&SchemaItem> {
        self.edit_target.as_ref()
    }

    /// Mutable access to the staged item for the forms layer.
    ///
    pub fn edit_target_mut(&mut self) -> Option<&mut SchemaItem> {
        self.edit_target.as_mut()
    }

    /// Stage a placeholder item for the active category. The item only
    /// enters the document on [`State::save_item`].
    ///
    pub fn create_new_item(&mut self, kind: NewItemKind) -> &mut Self {
        self.is_json_view = false;
        self.is_view_builder_open = false;
        let item = placeholder_item(self.active_category, kind, self.ids.next_id("new"));
        debug!(
            "Staging new {} '{}' in {}",
            item.kind(),
            item.id(),
            self.active_category
        );
        self.edit_target = Some(item);
        self.selected_item_id = None;
        self.is_editing = true;
        self
    }

    /// Stage a copy of an existing item of the active list for editing.
    ///
    pub fn begin_edit(&mut self, id: &str) -> Result<(), StateError> {
        let item = self
            .find_item(id)
            .ok_or_else(|| StateError::ItemNotFound { id: id.to_string() })?;
        self.edit_target = Some(item);
        self.selected_item_id = Some(id.to_string());
        self.is_editing = true;
        self.is_json_view = false;
        Ok(())
    }

    /// Discard the staged item without touching the document.
    ///
    pub fn cancel_edit(&mut self) -> &mut Self {
        self.edit_target = None;
        self.is_editing = false;
        self.is_view_builder_open = false;
        self
    }

    /// Put the staged item into the active list, replacing the item with the
    /// same id or appending, then persist and select it.
    ///
    /// Without a staged item this does nothing. If the item cannot go into
    /// the active list it stays staged and the error is returned.
    pub fn save_item(&mut self) -> Result<(), StateError> {
        let item = match self.edit_target.take() {
            Some(item) => item,
            None => {
                debug!("Save requested without an edit target, ignoring");
                return Ok(());
            }
        };

        let id = item.id().to_string();
        let result = self
            .active_list()
            .and_then(|list| list.insert(item.clone(), Placement::Upsert));
        if let Err(e) = result {
            self.edit_target = Some(item);
            return Err(e);
        }

        info!("Saved {} '{}' in {}", item.kind(), id, self.active_category);
        self.is_editing = false;
        self.is_view_builder_open = false;
        self.selected_item_id = Some(id);
        self.persist();
        Ok(())
    }

    /// Remove the item with the given id from the active list and persist.
    /// Returns whether an item was removed.
    ///
    pub fn delete_item(&mut self, id: &str) -> bool {
        let removed = match self.active_list() {
            Ok(list) => list.remove(id),
            Err(e) => {
                warn!("Nothing to delete: {}", e);
                false
            }
        };
        if removed {
            info!("Deleted '{}' from {}", id, self.active_category);
        }

        if self.selected_item_id.as_deref() == Some(id) {
            self.selected_item_id = None;
            self.is_editing = false;
        }
        self.persist();
        removed
    }

    /// Append a renamed copy of `item` with fresh ids to the active list and
    /// persist. Returns the id of the copy.
    ///
    pub fn duplicate_item(&mut self, item: &SchemaItem) -> Result<String, StateError> {
        let copy = duplicate(item, &mut self.ids);
        let id = copy.id().to_string();
        self.active_list()?.insert(copy, Placement::Append)?;
        info!("Duplicated '{}' as '{}'", item.id(), id);
        self.persist();
        Ok(id)
    }

    /// Render the export document into [`State::generated_json`] and switch
    /// to the JSON view.
    ///
    pub fn show_json_view(&mut self) -> &mut Self {
        self.is_editing = false;
        self.is_view_builder_open = false;
        match ExportDocument::new(&self.document).to_json() {
            Ok(json) => self.generated_json = json,
            Err(e) => error!("Failed to generate export: {}", e),
        }
        self.is_json_view = true;
        self
    }

    /// Write the last generated export into `dir_path`.
    ///
    pub fn download_json(&self, dir_path: &Path) -> Result<PathBuf, ExportError> {
        if self.generated_json.is_empty() {
            return Err(ExportError::NothingGenerated);
        }
        write_export(dir_path, &self.export_file_name, &self.generated_json)
    }

    /// Open the view builder for the staged action, attaching an empty view
    /// if it has none yet.
    ///
    pub fn open_view_builder(&mut self) -> &mut Self {
        match self.edit_target.as_mut() {
            Some(SchemaItem::Action(action)) => {
                if action.view.is_none() {
                    action.view = Some(ViewItem {
                        id: self.ids.next_id("view"),
                        name: format!("{}View", action.name),
                        description: None,
                        rows: vec![],
                    });
                }
                self.is_view_builder_open = true;
            }
            Some(other) => warn!(
                "View builder needs an action, edit target is a {}",
                other.kind()
            ),
            None => debug!("View builder requested without an edit target, ignoring"),
        }
        self
    }

    pub fn close_view_builder(&mut self) -> &mut Self {
        self.is_view_builder_open = false;
        self
    }

    /// Replace the document with the seed data and persist it.
    ///
    pub fn reset_to_seed(&mut self) -> &mut Self {
        info!("Resetting document to seed data");
        self.document = AppState::seed();
        self.action_path.clear();
        self.selected_item_id = None;
        self.cancel_edit();
        self.persist();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore, StoreError, STORAGE_KEY};
    use fake::{faker::lorem::en::Word, Fake};
    use std::collections::HashSet;

    fn state() -> State {
        State::new(Persistence::new(MemoryStore::new()))
    }

    fn persisted(state: &State) -> AppState {
        let serialized = state.persistence.store().get(STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&serialized).unwrap()
    }

    fn ids(items: &[SchemaItem]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn new_state_loads_seed() {
        let state = state();
        assert_eq!(*state.document(), AppState::seed());
        assert_eq!(state.active_category(), Category::Entities);
        assert!(state.action_path().is_root());
    }

    #[test]
    fn filtered_items_search_seed_entities() {
        let mut state = state();
        state.set_search_query("inventory");
        let items = state.filtered_items();
        assert_eq!(ids(&items), vec!["e2"]);
        assert_eq!(items[0].name(), "Product");
    }

    #[test]
    fn current_actions_empty_outside_actions() {
        let mut state = state();
        state.navigate_to_group("g1");
        assert!(state.current_actions().is_empty());
        state.set_active_category(Category::Actions);
        assert_eq!(state.current_actions().len(), 1);
        assert_eq!(state.current_actions()[0].id(), "a1");
    }

    #[test]
    fn navigating_to_unknown_group_shows_nothing() {
        let mut state = state();
        state.set_active_category(Category::Actions);
        state.navigate_to_group("missing");
        assert!(state.current_actions().is_empty());
        assert!(state.filtered_items().is_empty());
        state.set_action_path(vec![]);
        assert_eq!(state.current_actions().len(), 1);
    }

    #[test]
    fn create_stages_without_inserting() {
        let mut state = state();
        state.select_item(Some("e1".to_string()));
        state.create_new_item(NewItemKind::Action);
        assert!(state.is_editing());
        assert!(state.selected_item_id().is_none());
        assert_eq!(state.edit_target().unwrap().kind(), "entity");
        assert_eq!(state.document().entities.len(), 2);
    }

    #[test]
    fn save_appends_new_item_and_persists() {
        let mut state = state();
        state.set_active_category(Category::AccessControl);
        state.create_new_item(NewItemKind::Action);
        let id = state.edit_target().unwrap().id().to_string();
        state.save_item().unwrap();

        assert!(!state.is_editing());
        assert!(state.edit_target().is_none());
        assert_eq!(state.selected_item_id(), Some(id.as_str()));
        assert_eq!(state.document().access_control.last().unwrap().id, id);
        assert_eq!(persisted(&state), *state.document());
    }

    #[test]
    fn save_replaces_existing_item_in_place() {
        let mut state = state();
        state.begin_edit("e1").unwrap();
        state.edit_target_mut().unwrap().set_name("Account".to_string());
        state.save_item().unwrap();

        let entities = &state.document().entities;
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].id, "e1");
        assert_eq!(entities[0].name, "Account");
        assert_eq!(persisted(&state).entities[0].name, "Account");
    }

    #[test]
    fn save_without_target_is_noop() {
        let mut state = state();
        assert!(state.save_item().is_ok());
        assert_eq!(*state.document(), AppState::seed());
        assert!(state.persistence.store().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn ids_stay_unique_after_many_creates() {
        let mut state = state();
        state.set_active_category(Category::Services);
        for _ in 0..50 {
            state.create_new_item(NewItemKind::Action);
            let name: String = Word().fake();
            state.edit_target_mut().unwrap().set_name(name);
            state.save_item().unwrap();
        }
        let services = &state.document().services;
        let unique: HashSet<&str> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(services.len(), 51);
        assert_eq!(unique.len(), services.len());
    }

    #[test]
    fn save_into_nested_group() {
        let mut state = state();
        state.set_active_category(Category::Actions);
        state.navigate_to_group("g1");
        state.create_new_item(NewItemKind::Group);
        state.save_item().unwrap();

        let level = state.current_actions();
        assert_eq!(level.len(), 2);
        assert!(level[1].as_group().is_some());
        assert_eq!(state.document().actions.len(), 1);
    }

    #[test]
    fn save_into_unresolved_path_keeps_target() {
        let mut state = state();
        state.set_active_category(Category::Actions);
        state.create_new_item(NewItemKind::Action);
        state.navigate_to_group("missing");
        let error = state.save_item().unwrap_err();
        assert!(matches!(error, StateError::UnresolvedActionPath(_)));
        assert!(state.edit_target().is_some());
        assert!(state.is_editing());
    }

    #[test]
    fn save_of_foreign_kind_is_rejected() {
        let mut state = state();
        state.create_new_item(NewItemKind::Action);
        state.set_active_category(Category::Services);
        let error = state.save_item().unwrap_err();
        assert!(matches!(error, StateError::KindMismatch { kind: "entity", .. }));
        assert_eq!(state.document().services.len(), 1);
    }

    #[test]
    fn delete_removes_item_and_clears_selection() {
        let mut state = state();
        state.begin_edit("e2").unwrap();
        assert!(state.delete_item("e2"));
        assert!(state.find_item("e2").is_none());
        assert!(state.selected_item_id().is_none());
        assert!(!state.is_editing());
        assert_eq!(persisted(&state).entities.len(), 1);
    }

    #[test]
    fn delete_unknown_id_keeps_selection() {
        let mut state = state();
        state.select_item(Some("e1".to_string()));
        assert!(!state.delete_item("nope"));
        assert_eq!(state.selected_item_id(), Some("e1"));
        assert_eq!(state.document().entities.len(), 2);
    }

    #[test]
    fn duplicate_appends_copy_and_keeps_original() {
        let mut state = state();
        state.set_active_category(Category::Services);
        let original = state.find_item("s1").unwrap();
        let copy_id = state.duplicate_item(&original).unwrap();

        assert_ne!(copy_id, "s1");
        assert_eq!(state.find_item("s1").unwrap(), original);
        let copy = state.find_item(&copy_id).unwrap();
        assert_eq!(copy.name(), "EmailSenderCopy");
        assert_eq!(copy.display_name(), "Email Service Copy");
        assert_eq!(persisted(&state).services.len(), 2);
    }

    #[test]
    fn duplicate_group_at_root() {
        let mut state = state();
        state.set_active_category(Category::Actions);
        let group = state.find_item("g1").unwrap();
        let copy_id = state.duplicate_item(&group).unwrap();

        let forest = &state.document().actions;
        assert_eq!(forest.len(), 2);
        let copy = forest[1].as_group().unwrap();
        assert_eq!(copy.id, copy_id);
        assert_ne!(copy.actions[0].id(), "a1");
    }

    #[test]
    fn failed_writes_keep_in_memory_changes() {
        let mut state = State::new(Persistence::new(MemoryStore::with_quota(64)));
        assert!(state.delete_item("e1"));
        assert_eq!(state.document().entities.len(), 1);
        assert!(state.persistence.store().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn show_json_view_generates_export() {
        let mut state = state();
        state.begin_edit("e1").unwrap();
        state.show_json_view();
        assert!(state.is_json_view());
        assert!(!state.is_editing());
        let json: serde_json::Value = serde_json::from_str(state.generated_json()).unwrap();
        assert_eq!(json["accessControl"]["roles"][0]["name"], "Admin");
        assert_eq!(json["entities"][0]["id"], "e1");
    }

    #[test]
    fn create_leaves_json_view() {
        let mut state = state();
        state.show_json_view();
        state.create_new_item(NewItemKind::Action);
        assert!(!state.is_json_view());
    }

    #[test]
    fn download_requires_generated_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state().with_export_file_name("schema.json");
        assert!(matches!(
            state.download_json(dir.path()),
            Err(ExportError::NothingGenerated)
        ));
        state.show_json_view();
        let path = state.download_json(dir.path()).unwrap();
        assert!(path.ends_with("schema.json"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            state.generated_json()
        );
    }

    #[test]
    fn view_builder_attaches_view_to_action() {
        let mut state = state();
        state.set_active_category(Category::Actions);
        state.navigate_to_group("g1");
        state.begin_edit("a1").unwrap();
        state.open_view_builder();
        assert!(state.is_view_builder_open());
        match state.edit_target().unwrap() {
            SchemaItem::Action(action) => {
                let view = action.view.as_ref().unwrap();
                assert_eq!(view.name, "registerUserView");
                assert!(view.id.starts_with("view_"));
                assert!(view.rows.is_empty());
            }
            other => panic!("expected action, got {}", other.kind()),
        }

        state.save_item().unwrap();
        assert!(!state.is_view_builder_open());
        let saved = state.current_actions()[0].as_action().unwrap();
        assert!(saved.view.is_some());
    }

    #[test]
    fn view_builder_ignores_non_actions() {
        let mut state = state();
        state.begin_edit("e1").unwrap();
        state.open_view_builder();
        assert!(!state.is_view_builder_open());
        state.cancel_edit();
        state.open_view_builder();
        assert!(!state.is_view_builder_open());
    }

    #[test]
    fn begin_edit_unknown_id_fails() {
        let mut state = state();
        assert!(matches!(
            state.begin_edit("zzz"),
            Err(StateError::ItemNotFound { .. })
        ));
        assert!(!state.is_editing());
    }

    #[test]
    fn reset_restores_seed() {
        let mut state = state();
        state.delete_item("e1");
        state.set_active_category(Category::Actions);
        state.navigate_to_group("g1");
        state.reset_to_seed();
        assert_eq!(*state.document(), AppState::seed());
        assert!(state.action_path().is_root());
        assert_eq!(persisted(&state), AppState::seed());
    }

    #[test]
    fn reload_after_edits_restores_document() {
        struct Shared(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

        impl KeyValueStore for Shared {
            fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
                self.0.borrow().get(key)
            }

            fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
                self.0.borrow_mut().set(key, value)
            }
        }

        let backing = std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()));
        let mut state = State::new(Persistence::new(Shared(backing.clone())));
        state.set_active_category(Category::Environment);
        state.create_new_item(NewItemKind::Action);
        state.save_item().unwrap();
        let document = state.document().clone();

        let reopened = State::new(Persistence::new(Shared(backing)));
        assert_eq!(*reopened.document(), document);
    }
}
