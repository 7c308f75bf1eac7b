//! # Edit Session
//!
//! The document store. An `EditSession` owns the current project tree, the
//! id generator that feeds the element factory and the selection state.
//!
//! Every edit goes through [`EditSession::apply`]: the mutation runs on a
//! fork of the current tree, the fork replaces the tree and the selection
//! follows the reported changes.

use crate::mutations::{Change, DropPosition, ElementUpdate, Mutation, Outcome, SettingsUpdate};
use crate::persistence::PersistenceGateway;
use crate::post_effects::PostEffectEngine;
use crate::selection::Selection;
use crate::EditorError;
use sitekit_common::IdCollector;
use sitekit_model::{ElementType, IDGenerator, Project};

/// Single-user editing state for one project
#[derive(Debug)]
pub struct EditSession {
    project: Project,
    selection: Selection,
    ids: IDGenerator,
    engine: PostEffectEngine,

    /// Increments on each applied mutation
    version: u64,
}

impl EditSession {
    /// Start editing `project`, with the first page selected
    pub fn new(project: Project) -> Self {
        let ids = id_generator_for(&project);
        let selection = first_page_selection(&project);

        Self {
            project,
            selection,
            ids,
            engine: PostEffectEngine::new(),
            version: 0,
        }
    }

    pub fn with_engine(mut self, engine: PostEffectEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Load a project through a gateway
    pub fn load(gateway: &impl PersistenceGateway, project_id: &str) -> Result<Self, EditorError> {
        let content = gateway.load(project_id)?;
        let project = Project {
            id: project_id.to_string(),
            name: content.settings.site_name.clone(),
            content,
        };

        Ok(Self::new(project))
    }

    /// Persist the current tree. Last writer wins.
    pub fn save(&self, gateway: &impl PersistenceGateway) -> Result<(), EditorError> {
        gateway.save(&self.project.id, &self.project.content)?;
        Ok(())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Swap in a whole new tree, e.g. one received from elsewhere
    pub fn replace(&mut self, project: Project) {
        self.ids = id_generator_for(&project);
        self.selection = std::mem::take(&mut self.selection).repair(&project);
        self.project = project;
        self.version += 1;
    }

    /// Apply a mutation and replace the current tree with the result
    pub fn apply(&mut self, mutation: Mutation) -> Outcome {
        let result = self
            .engine
            .apply_with_effects(&mutation, &self.project, &mut self.ids);

        self.project = result.project;

        if result.outcome.is_applied() {
            self.version += 1;

            let mut selection = std::mem::take(&mut self.selection);
            for change in result.outcome.changes() {
                selection = selection.after(change, &self.project);
            }
            self.selection = selection;
        }

        result.outcome
    }

    /// Like [`apply`](Self::apply), but a no-op is reported as an error
    pub fn try_apply(&mut self, mutation: Mutation) -> Result<Vec<Change>, EditorError> {
        match self.apply(mutation) {
            Outcome::Applied { changes } => Ok(changes),
            Outcome::Noop { error } => Err(error.into()),
        }
    }

    pub fn add_page(&mut self, name: &str) -> Outcome {
        self.apply(Mutation::AddPage {
            name: name.to_string(),
        })
    }

    pub fn delete_page(&mut self, page_id: &str) -> Outcome {
        self.apply(Mutation::DeletePage {
            page_id: page_id.to_string(),
        })
    }

    /// Add a section to the selected page
    pub fn add_section(&mut self, name: &str) -> Result<Outcome, EditorError> {
        let page_id = self
            .selection
            .page_id()
            .ok_or(EditorError::NoPageSelected)?
            .to_string();

        Ok(self.apply(Mutation::AddSection {
            page_id,
            name: name.to_string(),
        }))
    }

    pub fn delete_section(&mut self, section_id: &str) -> Outcome {
        self.apply(Mutation::DeleteSection {
            section_id: section_id.to_string(),
        })
    }

    pub fn detach_section(&mut self, page_id: &str, section_id: &str) -> Outcome {
        self.apply(Mutation::DetachSection {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
        })
    }

    pub fn add_element(&mut self, section_id: &str, element_type: ElementType) -> Outcome {
        self.apply(Mutation::AddElement {
            section_id: section_id.to_string(),
            element_type,
        })
    }

    pub fn delete_element(&mut self, element_id: &str) -> Outcome {
        self.apply(Mutation::DeleteElement {
            element_id: element_id.to_string(),
        })
    }

    pub fn update_element(&mut self, element_id: &str, update: ElementUpdate) -> Outcome {
        self.apply(Mutation::UpdateElement {
            element_id: element_id.to_string(),
            update,
        })
    }

    pub fn move_element(&mut self, element_id: &str, target_id: &str, position: DropPosition) -> Outcome {
        self.apply(Mutation::MoveElement {
            element_id: element_id.to_string(),
            target_id: target_id.to_string(),
            position,
        })
    }

    pub fn duplicate_element(&mut self, element_id: &str) -> Outcome {
        self.apply(Mutation::DuplicateElement {
            element_id: element_id.to_string(),
        })
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Outcome {
        self.apply(Mutation::UpdateSettings { update })
    }

    /// Returns false and keeps the current selection if the page does not exist
    pub fn select_page(&mut self, page_id: &str) -> bool {
        self.select(Selection::page(&self.project, page_id))
    }

    pub fn select_section(&mut self, section_id: &str) -> bool {
        self.select(Selection::section(&self.project, section_id, &self.selection))
    }

    pub fn select_element(&mut self, element_id: &str) -> bool {
        self.select(Selection::element(&self.project, element_id, &self.selection))
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    fn select(&mut self, selection: Option<Selection>) -> bool {
        match selection {
            Some(selection) => {
                self.selection = selection;
                true
            }
            None => false,
        }
    }
}

/// Generator seeded from the project id, advanced past every id already in the tree
fn id_generator_for(project: &Project) -> IDGenerator {
    let mut ids = IDGenerator::new(&project.id);
    for id in IdCollector::collect(project).all() {
        ids.observe(id);
    }
    ids
}

fn first_page_selection(project: &Project) -> Selection {
    project
        .content
        .pages
        .first()
        .and_then(|page| Selection::page(project, &page.id))
        .unwrap_or_default()
}
