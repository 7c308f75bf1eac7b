//! # Clone Engine
//!
//! Every mutation starts by forking the current tree. The fork is a full
//! structural copy: all document types own their data (`String`, `Vec`,
//! `serde_json::Value`, `IndexMap`) so nothing reachable from the fork points
//! back into the original. Cycles cannot be expressed with owned values.

use crate::document::{Project, Section};

/// Owned, independent copy of a document value
pub fn fork<T: Clone>(tree: &T) -> T {
    tree.clone()
}

/// Fork a whole project, tracing its size
pub fn fork_project(project: &Project) -> Project {
    tracing::trace!(
        project = %project.id,
        pages = project.content.pages.len(),
        sections = project.content.sections.len(),
        elements = project.content.sections.iter().map(Section::element_count).sum::<usize>(),
        "forking project"
    );
    fork(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Page, PropertyMap};
    use serde_json::json;

    fn sample() -> Project {
        let mut project = Project::new("p", "Site");

        let mut inner = Element {
            id: "inner".to_string(),
            name: "Text".to_string(),
            kind: "text".parse().unwrap(),
            content: PropertyMap::new(),
            style: PropertyMap::new(),
            children: vec![],
        };
        inner.content.insert("text".to_string(), json!("hello"));

        let mut outer = inner.clone();
        outer.id = "outer".to_string();
        outer.kind = "container".parse().unwrap();
        outer.children.push(inner);

        let mut section = Section::new("s", "Hero");
        section.elements.push(outer);
        project.content.sections.insert(section);

        let mut page = Page::new("home", "Home");
        page.sections.push("s".to_string());
        project.content.pages.push(page);

        project
    }

    #[test]
    fn test_fork_is_deep_equal() {
        let original = sample();
        assert_eq!(fork_project(&original), original);
    }

    #[test]
    fn test_mutating_fork_leaves_original_untouched() {
        let original = sample();
        let snapshot = original.clone();

        let mut copy = fork_project(&original);
        copy.find_element_mut("inner")
            .unwrap()
            .content
            .insert("text".to_string(), json!("changed"));
        copy.content.pages[0].sections.clear();
        copy.content.sections.get_mut("s").unwrap().elements.clear();
        copy.content.settings.theme.primary_color = "#000".to_string();

        assert_eq!(original, snapshot);
        assert_eq!(original.find_element("inner").unwrap().content["text"], json!("hello"));
    }

    #[test]
    fn test_element_count_includes_children() {
        let project = sample();
        assert_eq!(project.section("s").unwrap().element_count(), 2);
    }
}
