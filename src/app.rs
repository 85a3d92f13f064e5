use crate::config::Config;
use crate::model::{SchemaItem, SchemaRecord};
use crate::state::{ActionPath, Category, NewItemKind, State};
use crate::store::{FileStore, Persistence};
use anyhow::{anyhow, Result};
use log::*;
use std::path::PathBuf;

/// Specify the operations available from the command line.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    List {
        category: Category,
        path: ActionPath,
        search: Option<String>,
    },
    Show {
        category: Category,
        path: ActionPath,
        id: String,
    },
    New {
        category: Category,
        path: ActionPath,
        kind: NewItemKind,
        name: Option<String>,
    },
    Duplicate {
        category: Category,
        path: ActionPath,
        id: String,
    },
    Delete {
        category: Category,
        path: ActionPath,
        id: String,
    },
    Export {
        output: Option<PathBuf>,
        print: bool,
    },
    Reset,
}

/// Oversees the edit session and runs commands against it.
///
pub struct App {
    state: State,
}

impl App {
    /// Start a new application according to the given configuration, run the
    /// command and print its output.
    ///
    pub fn start(config: Config, command: Command) -> Result<()> {
        info!("Starting application...");
        let mut app = App::new(&config)?;
        let output = app.run(command)?;
        if !output.is_empty() {
            println!("{}", output);
        }
        info!("Exiting application...");
        Ok(())
    }

    /// Open the document store named by the configuration.
    ///
    pub fn new(config: &Config) -> Result<App> {
        let store_dir = config.store_dir()?;
        debug!("Using document store at {}", store_dir.display());
        let state = State::new(Persistence::new(FileStore::new(store_dir)))
            .with_export_file_name(&config.export_file_name);
        Ok(App { state })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Run a single command, returning the text to show the user.
    ///
    pub fn run(&mut self, command: Command) -> Result<String> {
        debug!("Running command {:?}", command);
        match command {
            Command::List {
                category,
                path,
                search,
            } => {
                self.focus(category, path);
                self.state.set_search_query(search.as_deref().unwrap_or(""));
                Ok(self
                    .state
                    .filtered_items()
                    .iter()
                    .map(list_line)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Show { category, path, id } => {
                self.focus(category, path);
                let item = self.find(&id)?;
                Ok(serde_json::to_string_pretty(&item)?)
            }
            Command::New {
                category,
                path,
                kind,
                name,
            } => {
                self.focus(category, path);
                self.state.create_new_item(kind);
                if let (Some(name), Some(target)) = (name, self.state.edit_target_mut()) {
                    target.set_name(name);
                }
                self.state.save_item()?;
                Ok(self
                    .state
                    .selected_item_id()
                    .map(str::to_string)
                    .unwrap_or_default())
            }
            Command::Duplicate { category, path, id } => {
                self.focus(category, path);
                let item = self.find(&id)?;
                Ok(self.state.duplicate_item(&item)?)
            }
            Command::Delete { category, path, id } => {
                self.focus(category, path);
                if self.state.delete_item(&id) {
                    Ok(format!("Deleted {}", id))
                } else {
                    Err(anyhow!("No item '{}' in {}", id, category))
                }
            }
            Command::Export { output, print } => {
                self.state.show_json_view();
                let mut lines = vec![];
                if let Some(dir) = output {
                    let path = self.state.download_json(&dir)?;
                    lines.push(format!("Wrote {}", path.display()));
                }
                if print {
                    lines.push(self.state.generated_json().to_string());
                }
                Ok(lines.join("\n"))
            }
            Command::Reset => {
                self.state.reset_to_seed();
                Ok("Document reset to seed data".to_string())
            }
        }
    }

    fn focus(&mut self, category: Category, path: ActionPath) {
        self.state
            .set_active_category(category)
            .set_action_path(path.segments().to_vec());
    }

    fn find(&self, id: &str) -> Result<SchemaItem> {
        self.state.find_item(id).ok_or_else(|| {
            anyhow!(
                "No item '{}' in {}{}",
                id,
                self.state.active_category(),
                self.state.action_path()
            )
        })
    }
}

fn list_line(item: &SchemaItem) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        item.id(),
        item.kind(),
        item.display_name(),
        item.description_text()
    )
}
