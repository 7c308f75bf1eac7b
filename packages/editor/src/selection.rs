//! # Selection
//!
//! ```text
//! None → Page → Section → Element
//! ```
//!
//! Each level carries the ids of the levels above it. After every applied
//! change the selection is repaired: a level whose node no longer exists
//! falls back to the nearest ancestor that still does.

use crate::mutations::Change;
use sitekit_model::Project;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Page {
        page_id: String,
    },
    Section {
        page_id: String,
        section_id: String,
    },
    Element {
        page_id: String,
        section_id: String,
        element_id: String,
    },
}

impl Selection {
    pub fn page_id(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Page { page_id }
            | Selection::Section { page_id, .. }
            | Selection::Element { page_id, .. } => Some(page_id),
        }
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Selection::Section { section_id, .. } | Selection::Element { section_id, .. } => {
                Some(section_id)
            }
            _ => None,
        }
    }

    pub fn element_id(&self) -> Option<&str> {
        match self {
            Selection::Element { element_id, .. } => Some(element_id),
            _ => None,
        }
    }

    /// Select a page if it exists
    pub fn page(project: &Project, page_id: &str) -> Option<Selection> {
        project.page(page_id).map(|_| Selection::Page {
            page_id: page_id.to_string(),
        })
    }

    /// Select a section, keeping `current` page when it lists the section
    pub fn section(project: &Project, section_id: &str, current: &Selection) -> Option<Selection> {
        project.section(section_id)?;
        let page_id = page_for_section(project, section_id, current.page_id())?;

        Some(Selection::Section {
            page_id,
            section_id: section_id.to_string(),
        })
    }

    /// Select an element, resolving its section and a page that shows it
    pub fn element(project: &Project, element_id: &str, current: &Selection) -> Option<Selection> {
        let section_id = project.section_of_element(element_id)?;
        let page_id = page_for_section(project, section_id, current.page_id())?;

        Some(Selection::Element {
            page_id,
            section_id: section_id.to_string(),
            element_id: element_id.to_string(),
        })
    }

    /// Selection after `change` was applied, producing `project`
    pub fn after(self, change: &Change, project: &Project) -> Selection {
        let proposed = match change {
            Change::PageAdded { page_id } => Selection::Page {
                page_id: page_id.clone(),
            },
            Change::SectionAdded {
                page_id,
                section_id,
            } => Selection::Section {
                page_id: page_id.clone(),
                section_id: section_id.clone(),
            },
            Change::ElementAdded { element_id, .. }
            | Change::ElementDuplicated { element_id, .. }
            | Change::ElementMoved { element_id, .. } => {
                Selection::element(project, element_id, &self).unwrap_or(self)
            }
            _ => self,
        };

        proposed.repair(project)
    }

    /// Fall back to the nearest level whose node still exists
    pub fn repair(self, project: &Project) -> Selection {
        match self {
            Selection::None => Selection::None,

            Selection::Page { page_id } => {
                if project.page(&page_id).is_some() {
                    Selection::Page { page_id }
                } else {
                    first_page(project)
                }
            }

            Selection::Section {
                page_id,
                section_id,
            } => {
                let Some(page) = project.page(&page_id) else {
                    return first_page(project);
                };

                let still_listed = page.sections.iter().any(|s| *s == section_id);
                if still_listed && project.section(&section_id).is_some() {
                    return Selection::Section {
                        page_id,
                        section_id,
                    };
                }

                match page.sections.iter().find(|s| project.section(s).is_some()) {
                    Some(first) => Selection::Section {
                        page_id: page_id.clone(),
                        section_id: first.clone(),
                    },
                    None => Selection::Page { page_id },
                }
            }

            Selection::Element {
                page_id,
                section_id,
                element_id,
            } => {
                let element_present = project
                    .section(&section_id)
                    .and_then(|s| s.find_element(&element_id))
                    .is_some();

                let section = Selection::Section {
                    page_id,
                    section_id,
                }
                .repair(project);

                match section {
                    Selection::Section {
                        page_id,
                        section_id,
                    } if element_present => Selection::Element {
                        page_id,
                        section_id,
                        element_id,
                    },
                    other => other,
                }
            }
        }
    }
}

fn first_page(project: &Project) -> Selection {
    match project.content.pages.first() {
        Some(page) => Selection::Page {
            page_id: page.id.clone(),
        },
        None => Selection::None,
    }
}

/// The preferred page if it lists the section, otherwise the first page that does
fn page_for_section(project: &Project, section_id: &str, preferred: Option<&str>) -> Option<String> {
    let lists = |page: &&sitekit_model::Page| page.sections.iter().any(|s| s == section_id);

    preferred
        .and_then(|id| project.page(id))
        .filter(lists)
        .or_else(|| project.content.pages.iter().find(lists))
        .map(|page| page.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_model::{Element, Page, PropertyMap, Section};

    fn element(id: &str) -> Element {
        Element {
            id: id.to_string(),
            name: id.to_string(),
            kind: "text".parse().unwrap(),
            content: PropertyMap::new(),
            style: PropertyMap::new(),
            children: vec![],
        }
    }

    fn project() -> Project {
        let mut project = Project::new("p", "Site");
        let mut hero = Section::new("hero", "Hero");
        hero.elements.push(element("title"));
        project.content.sections.insert(hero);
        project.content.sections.insert(Section::new("body", "Body"));

        let mut home = Page::new("home", "Home");
        home.sections = vec!["hero".to_string(), "body".to_string()];
        project.content.pages.push(home);
        project.content.pages.push(Page::new("about", "About"));
        project
    }

    #[test]
    fn test_select_element_resolves_section_and_page() {
        let selection = Selection::element(&project(), "title", &Selection::None).unwrap();
        assert_eq!(selection.page_id(), Some("home"));
        assert_eq!(selection.section_id(), Some("hero"));
        assert_eq!(selection.element_id(), Some("title"));
    }

    #[test]
    fn test_select_missing_nodes() {
        let project = project();
        assert!(Selection::page(&project, "nope").is_none());
        assert!(Selection::section(&project, "nope", &Selection::None).is_none());
        assert!(Selection::element(&project, "nope", &Selection::None).is_none());
    }

    #[test]
    fn test_deleted_element_falls_back_to_section() {
        let mut project = project();
        let selection = Selection::element(&project, "title", &Selection::None).unwrap();
        project.section_mut("hero").unwrap().elements.clear();

        assert_eq!(
            selection.repair(&project),
            Selection::Section {
                page_id: "home".to_string(),
                section_id: "hero".to_string(),
            }
        );
    }

    #[test]
    fn test_deleted_section_falls_back_to_first_remaining() {
        let mut project = project();
        let selection = Selection::section(&project, "hero", &Selection::None).unwrap();
        project.content.sections.remove("hero");
        project.content.pages[0].sections.retain(|s| s != "hero");

        assert_eq!(
            selection.repair(&project),
            Selection::Section {
                page_id: "home".to_string(),
                section_id: "body".to_string(),
            }
        );
    }

    #[test]
    fn test_last_section_deleted_keeps_page() {
        let mut project = project();
        let selection = Selection::section(&project, "body", &Selection::None).unwrap();
        project.content.pages[0].sections.clear();

        assert_eq!(
            selection.repair(&project),
            Selection::Page {
                page_id: "home".to_string()
            }
        );
    }

    #[test]
    fn test_selection_follows_element_moved_to_other_section() {
        let mut project = project();
        let selection = Selection::Section {
            page_id: "home".to_string(),
            section_id: "hero".to_string(),
        };
        let title = project.section_mut("hero").unwrap().elements.remove(0);
        project.section_mut("body").unwrap().elements.push(title);

        let change = Change::ElementMoved {
            element_id: "title".to_string(),
            from_section_id: "hero".to_string(),
            to_section_id: "body".to_string(),
        };

        assert_eq!(
            selection.after(&change, &project),
            Selection::Element {
                page_id: "home".to_string(),
                section_id: "body".to_string(),
                element_id: "title".to_string(),
            }
        );
    }

    #[test]
    fn test_deleted_page_falls_back_to_first_page_or_none() {
        let mut project = project();
        let selection = Selection::Page {
            page_id: "about".to_string(),
        };
        project.content.pages.retain(|p| p.id != "about");
        assert_eq!(selection.clone().repair(&project).page_id(), Some("home"));

        project.content.pages.clear();
        assert_eq!(selection.repair(&project), Selection::None);
    }
}
