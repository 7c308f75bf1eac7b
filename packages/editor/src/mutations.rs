//! # Document Mutations
//!
//! Semantic operations on a project tree.
//!
//! ## Design Principles
//!
//! 1. **Fork, patch, replace**: the current tree is never edited. Each
//!    mutation forks it, patches the fork and hands the fork back.
//! 2. **Fail closed**: a mutation naming an id that does not exist yields
//!    a tree equal to its input and a `Noop` outcome. Nothing panics.
//! 3. **Atomic**: a mutation and its post-effects land in the same fork,
//!    or none of them do.
//!
//! ## Mutation Semantics
//!
//! ### MoveElement
//! - The source is removed first, then the target is resolved
//! - Section target: `before` prepends, `after` and `inside` append
//! - Element target: spliced next to it; `inside` behaves like `after`
//! - Unresolvable target: the whole move is rolled back
//!
//! ### DeleteElement
//! - Removes the element and its children, wherever it is nested
//! - Deleting an absent id is a no-op
//!
//! ### DeleteSection
//! - Removes the section and every page's reference to it

use crate::post_effects::PostEffectEngine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitekit_common::{walk_element_mut, VisitorMut};
use sitekit_model::{
    bucket_of, create_element, Element, ElementType, FieldBucket, IDGenerator, Page, Project,
    PropertyMap, Section,
};
use thiserror::Error;

/// Coordinates given to an element dropped into a section without any of its own
pub const DEFAULT_DROP_POSITION: [(&str, &str); 2] = [("left", "0px"), ("top", "0px")];

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Build an element with the factory and append it to a section
    AddElement {
        section_id: String,
        element_type: ElementType,
    },

    /// Remove an element (and its children)
    DeleteElement { element_id: String },

    /// Shallow-merge content and style fields into an element
    UpdateElement {
        element_id: String,
        update: ElementUpdate,
    },

    /// Drag-and-drop reorder or move across sections
    MoveElement {
        element_id: String,
        target_id: String,
        position: DropPosition,
    },

    /// Insert a copy with fresh ids right after the original
    DuplicateElement { element_id: String },

    AddPage { name: String },

    /// Remove a page. The sections it referenced are kept.
    DeletePage { page_id: String },

    /// Create a section and reference it from a page
    AddSection { page_id: String, name: String },

    /// Remove a section and every reference to it
    DeleteSection { section_id: String },

    /// Drop one page's reference to a section, keeping the section
    DetachSection { page_id: String, section_id: String },

    UpdateSettings { update: SettingsUpdate },
}

/// Where a dragged element lands relative to its drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

/// Partial element update coming from a property panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub content: PropertyMap,
    #[serde(default)]
    pub style: PropertyMap,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Route a flat field map into content and style using the field whitelist.
    /// Unrecognized fields are dropped.
    pub fn from_fields(fields: PropertyMap) -> Self {
        let mut update = Self::default();
        for (key, value) in fields {
            match bucket_of(&key) {
                Some(FieldBucket::Content) => {
                    update.content.insert(key, value);
                }
                Some(FieldBucket::Style) => {
                    update.style.insert(key, value);
                }
                None => tracing::warn!(key = %key, "ignoring unknown element field"),
            }
        }
        update
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_empty() && self.style.is_empty()
    }

    fn apply_to(&self, element: &mut Element) {
        if let Some(name) = &self.name {
            element.name = name.clone();
        }
        element.content.extend(self.content.clone());
        element.style.extend(self.style.clone());
    }
}

/// Partial site settings update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Drop target not found: {0}")]
    TargetNotFound(String),

    #[error("Section {section_id} is not on page {page_id}")]
    SectionNotOnPage { page_id: String, section_id: String },
}

/// What an applied mutation changed
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    ElementAdded {
        section_id: String,
        element_id: String,
    },
    ElementRemoved {
        section_id: String,
        element_id: String,
    },
    ElementUpdated {
        element_id: String,
    },
    ElementMoved {
        element_id: String,
        from_section_id: String,
        to_section_id: String,
    },
    ElementDuplicated {
        source_id: String,
        element_id: String,
        section_id: String,
    },
    PageAdded {
        page_id: String,
    },
    PageRemoved {
        page_id: String,
    },
    SectionAdded {
        page_id: String,
        section_id: String,
    },
    SectionRemoved {
        section_id: String,
    },
    SectionDetached {
        page_id: String,
        section_id: String,
    },
    SettingsUpdated,
}

/// Whether a mutation took effect
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Primary change first, then any post-effect changes
    Applied { changes: Vec<Change> },
    /// Nothing changed; the returned tree equals the input
    Noop { error: MutationError },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    pub fn changes(&self) -> &[Change] {
        match self {
            Outcome::Applied { changes } => changes,
            Outcome::Noop { .. } => &[],
        }
    }

    pub fn primary(&self) -> Option<&Change> {
        self.changes().first()
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// The new tree. Always a fresh value, never the input.
    pub project: Project,

    pub outcome: Outcome,
}

impl Mutation {
    /// Apply to a fork of `tree` with the standard post-effects
    pub fn apply(&self, tree: &Project, ids: &mut IDGenerator) -> MutationResult {
        PostEffectEngine::new().apply_with_effects(self, tree, ids)
    }

    /// Validate and apply in place. Only ever called on a fork.
    pub(crate) fn patch(
        &self,
        doc: &mut Project,
        ids: &mut IDGenerator,
    ) -> Result<Change, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::AddElement {
                section_id,
                element_type,
            } => Self::apply_add_element(doc, section_id, element_type, ids),

            Mutation::DeleteElement { element_id } => Self::apply_delete_element(doc, element_id),

            Mutation::UpdateElement { element_id, update } => {
                Self::apply_update_element(doc, element_id, update)
            }

            Mutation::MoveElement {
                element_id,
                target_id,
                position,
            } => Self::apply_move(doc, element_id, target_id, *position),

            Mutation::DuplicateElement { element_id } => {
                Self::apply_duplicate(doc, element_id, ids)
            }

            Mutation::AddPage { name } => {
                let page = Page::new(ids.new_id(), name.as_str());
                let page_id = page.id.clone();
                doc.content.pages.push(page);
                Ok(Change::PageAdded { page_id })
            }

            Mutation::DeletePage { page_id } => Self::apply_delete_page(doc, page_id),

            Mutation::AddSection { page_id, name } => {
                Self::apply_add_section(doc, page_id, name, ids)
            }

            Mutation::DeleteSection { section_id } => {
                doc.content
                    .sections
                    .remove(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(Change::SectionRemoved {
                    section_id: section_id.clone(),
                })
            }

            Mutation::DetachSection {
                page_id,
                section_id,
            } => Self::apply_detach_section(doc, page_id, section_id),

            Mutation::UpdateSettings { update } => {
                Self::apply_update_settings(doc, update);
                Ok(Change::SettingsUpdated)
            }
        }
    }

    fn apply_add_element(
        doc: &mut Project,
        section_id: &str,
        element_type: &ElementType,
        ids: &mut IDGenerator,
    ) -> Result<Change, MutationError> {
        let section = doc
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;

        let element = create_element(element_type, ids);
        let element_id = element.id.clone();
        section.elements.push(element);

        Ok(Change::ElementAdded {
            section_id: section_id.to_string(),
            element_id,
        })
    }

    fn apply_delete_element(doc: &mut Project, element_id: &str) -> Result<Change, MutationError> {
        let (section_id, _removed) = Self::remove_element(doc, element_id)?;

        Ok(Change::ElementRemoved {
            section_id,
            element_id: element_id.to_string(),
        })
    }

    fn apply_update_element(
        doc: &mut Project,
        element_id: &str,
        update: &ElementUpdate,
    ) -> Result<Change, MutationError> {
        let element = doc
            .find_element_mut(element_id)
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;

        update.apply_to(element);

        Ok(Change::ElementUpdated {
            element_id: element_id.to_string(),
        })
    }

    fn apply_move(
        doc: &mut Project,
        element_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<Change, MutationError> {
        // Indices shift once the source is gone, so the target is resolved afterwards
        let (from_section_id, mut moved) = Self::remove_element(doc, element_id)?;

        if let Some(section) = doc.section_mut(target_id) {
            match position {
                DropPosition::Before => section.elements.insert(0, moved),
                DropPosition::After => section.elements.push(moved),
                DropPosition::Inside => {
                    if !moved.has_position() {
                        for (key, value) in DEFAULT_DROP_POSITION {
                            moved.style.insert(key.to_string(), Value::from(value));
                        }
                    }
                    section.elements.push(moved);
                }
            }

            return Ok(Change::ElementMoved {
                element_id: element_id.to_string(),
                from_section_id,
                to_section_id: target_id.to_string(),
            });
        }

        let after = !matches!(position, DropPosition::Before);
        for section in doc.content.sections.iter_mut() {
            match insert_relative(&mut section.elements, target_id, moved, after) {
                Ok(()) => {
                    return Ok(Change::ElementMoved {
                        element_id: element_id.to_string(),
                        from_section_id,
                        to_section_id: section.id.clone(),
                    });
                }
                Err(back) => moved = back,
            }
        }

        Err(MutationError::TargetNotFound(target_id.to_string()))
    }

    fn apply_duplicate(
        doc: &mut Project,
        element_id: &str,
        ids: &mut IDGenerator,
    ) -> Result<Change, MutationError> {
        let mut copy = doc
            .find_element(element_id)
            .cloned()
            .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))?;

        Reidentify { ids }.visit_element_mut(&mut copy);
        copy.name = format!("{} (copy)", copy.name);
        let copy_id = copy.id.clone();

        for section in doc.content.sections.iter_mut() {
            match insert_relative(&mut section.elements, element_id, copy, true) {
                Ok(()) => {
                    return Ok(Change::ElementDuplicated {
                        source_id: element_id.to_string(),
                        element_id: copy_id,
                        section_id: section.id.clone(),
                    });
                }
                Err(back) => copy = back,
            }
        }

        Err(MutationError::ElementNotFound(element_id.to_string()))
    }

    fn apply_delete_page(doc: &mut Project, page_id: &str) -> Result<Change, MutationError> {
        let index = doc
            .content
            .pages
            .iter()
            .position(|p| p.id == page_id)
            .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;

        doc.content.pages.remove(index);

        Ok(Change::PageRemoved {
            page_id: page_id.to_string(),
        })
    }

    fn apply_add_section(
        doc: &mut Project,
        page_id: &str,
        name: &str,
        ids: &mut IDGenerator,
    ) -> Result<Change, MutationError> {
        let page = doc
            .page_mut(page_id)
            .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;

        let section = Section::new(ids.new_id(), name);
        let section_id = section.id.clone();

        // Both writes land in the same fork
        page.sections.push(section_id.clone());
        doc.content.sections.insert(section);

        Ok(Change::SectionAdded {
            page_id: page_id.to_string(),
            section_id,
        })
    }

    fn apply_detach_section(
        doc: &mut Project,
        page_id: &str,
        section_id: &str,
    ) -> Result<Change, MutationError> {
        let page = doc
            .page_mut(page_id)
            .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;

        if !page.sections.iter().any(|s| s == section_id) {
            return Err(MutationError::SectionNotOnPage {
                page_id: page_id.to_string(),
                section_id: section_id.to_string(),
            });
        }

        page.sections.retain(|s| s != section_id);

        Ok(Change::SectionDetached {
            page_id: page_id.to_string(),
            section_id: section_id.to_string(),
        })
    }

    fn apply_update_settings(doc: &mut Project, update: &SettingsUpdate) {
        let settings = &mut doc.content.settings;

        if let Some(site_name) = &update.site_name {
            settings.site_name = site_name.clone();
        }
        if let Some(favicon) = &update.favicon {
            settings.favicon = favicon.clone();
        }
        if let Some(color) = &update.primary_color {
            settings.theme.primary_color = color.clone();
        }
        if let Some(color) = &update.secondary_color {
            settings.theme.secondary_color = color.clone();
        }
        if let Some(font) = &update.font_family {
            settings.theme.font_family = font.clone();
        }
    }

    /// Remove an element from wherever it lives and return it with its section id
    fn remove_element(doc: &mut Project, element_id: &str) -> Result<(String, Element), MutationError> {
        for section in doc.content.sections.iter_mut() {
            if let Some(removed) = remove_from(&mut section.elements, element_id) {
                return Ok((section.id.clone(), removed));
            }
        }

        Err(MutationError::ElementNotFound(element_id.to_string()))
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement { section_id, .. } => {
                doc.section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(())
            }

            Mutation::DeleteElement { element_id }
            | Mutation::UpdateElement { element_id, .. }
            | Mutation::DuplicateElement { element_id } => {
                doc.find_element(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                Ok(())
            }

            Mutation::MoveElement {
                element_id,
                target_id,
                ..
            } => {
                doc.find_element(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;

                let target_exists =
                    doc.section(target_id).is_some() || doc.find_element(target_id).is_some();
                if target_id == element_id || !target_exists {
                    return Err(MutationError::TargetNotFound(target_id.clone()));
                }

                Ok(())
            }

            Mutation::AddPage { .. } | Mutation::UpdateSettings { .. } => Ok(()),

            Mutation::DeletePage { page_id } | Mutation::AddSection { page_id, .. } => {
                doc.page(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                Ok(())
            }

            Mutation::DeleteSection { section_id } => {
                doc.section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(())
            }

            Mutation::DetachSection {
                page_id,
                section_id,
            } => {
                let page = doc
                    .page(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;

                if page.sections.iter().any(|s| s == section_id) {
                    Ok(())
                } else {
                    Err(MutationError::SectionNotOnPage {
                        page_id: page_id.clone(),
                        section_id: section_id.clone(),
                    })
                }
            }
        }
    }

    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "add_element",
            Mutation::DeleteElement { .. } => "delete_element",
            Mutation::UpdateElement { .. } => "update_element",
            Mutation::MoveElement { .. } => "move_element",
            Mutation::DuplicateElement { .. } => "duplicate_element",
            Mutation::AddPage { .. } => "add_page",
            Mutation::DeletePage { .. } => "delete_page",
            Mutation::AddSection { .. } => "add_section",
            Mutation::DeleteSection { .. } => "delete_section",
            Mutation::DetachSection { .. } => "detach_section",
            Mutation::UpdateSettings { .. } => "update_settings",
        }
    }
}

/// Remove the element with `target_id` from `elements` or any nested children
fn remove_from(elements: &mut Vec<Element>, target_id: &str) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|e| e.id == target_id) {
        return Some(elements.remove(pos));
    }

    for element in elements.iter_mut() {
        if let Some(removed) = remove_from(&mut element.children, target_id) {
            return Some(removed);
        }
    }

    None
}

/// Insert `element` next to `target_id`, searching nested children.
/// Hands the element back if the target is not in this list.
fn insert_relative(
    elements: &mut Vec<Element>,
    target_id: &str,
    element: Element,
    after: bool,
) -> Result<(), Element> {
    if let Some(pos) = elements.iter().position(|e| e.id == target_id) {
        let index = if after { pos + 1 } else { pos };
        elements.insert(index, element);
        return Ok(());
    }

    let mut element = element;
    for child in elements.iter_mut() {
        match insert_relative(&mut child.children, target_id, element, after) {
            Ok(()) => return Ok(()),
            Err(back) => element = back,
        }
    }

    Err(element)
}

/// Gives an element and all its descendants fresh ids
struct Reidentify<'a> {
    ids: &'a mut IDGenerator,
}

impl VisitorMut for Reidentify<'_> {
    fn visit_element_mut(&mut self, element: &mut Element) {
        element.id = self.ids.new_id();
        walk_element_mut(self, element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveElement {
            element_id: "el-1".to_string(),
            target_id: "el-2".to_string(),
            position: DropPosition::After,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_element_type_parsed_at_boundary() {
        let json = r#"{ "AddElement": { "section_id": "s", "element_type": "cyber-button:cb-3" } }"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();

        match mutation {
            Mutation::AddElement { element_type, .. } => {
                assert_eq!(element_type.base, "cyber-button");
                assert_eq!(element_type.variant.as_deref(), Some("cb-3"));
            }
            other => panic!("unexpected mutation {:?}", other),
        }
    }

    #[test]
    fn test_update_from_fields_routes_buckets() {
        let mut fields = PropertyMap::new();
        fields.insert("text".to_string(), json!("Hi"));
        fields.insert("color".to_string(), json!("red"));
        fields.insert("onHover".to_string(), json!("x"));

        let update = ElementUpdate::from_fields(fields);
        assert_eq!(update.content.get("text"), Some(&json!("Hi")));
        assert_eq!(update.style.get("color"), Some(&json!("red")));
        assert!(!update.content.contains_key("onHover"));
        assert!(!update.style.contains_key("onHover"));
    }

    #[test]
    fn test_validation_rejects_empty_ids() {
        let doc = Project::new("p", "Site");

        let mutation = Mutation::DeleteElement {
            element_id: "".to_string(),
        };

        assert_eq!(
            mutation.validate(&doc),
            Err(MutationError::ElementNotFound(String::new()))
        );
    }

    #[test]
    fn test_remove_and_insert_relative_nested() {
        let leaf = |id: &str| Element {
            id: id.to_string(),
            name: id.to_string(),
            kind: "text".parse().unwrap(),
            content: PropertyMap::new(),
            style: PropertyMap::new(),
            children: vec![],
        };

        let mut container = leaf("box");
        container.children = vec![leaf("a"), leaf("b")];
        let mut elements = vec![container, leaf("c")];

        let c = remove_from(&mut elements, "c").unwrap();
        assert_eq!(c.id, "c");
        assert!(insert_relative(&mut elements, "a", c, true).is_ok());

        let nested: Vec<_> = elements[0].children.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(nested, vec!["a", "c", "b"]);

        let stray = leaf("z");
        let back = insert_relative(&mut elements, "missing", stray, false).unwrap_err();
        assert_eq!(back.id, "z");
    }
}
