use sitekit_model::{Element, Page, Project, Section};

/// Visitor pattern for traversing the project tree immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_project(&mut self, project: &Project) {
        walk_project(self, project);
    }

    fn visit_page(&mut self, _page: &Page) {
        // Pages only hold references, nothing to walk
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }
}

/// Mutable visitor pattern for transforming the project tree
///
/// Similar to Visitor, but provides mutable access to nodes.
pub trait VisitorMut: Sized {
    fn visit_project_mut(&mut self, project: &mut Project) {
        walk_project_mut(self, project);
    }

    fn visit_page_mut(&mut self, _page: &mut Page) {}

    fn visit_section_mut(&mut self, section: &mut Section) {
        walk_section_mut(self, section);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }
}

// Default walk implementations for immutable visitor

pub fn walk_project<V: Visitor>(visitor: &mut V, project: &Project) {
    for page in &project.content.pages {
        visitor.visit_page(page);
    }
    for section in project.content.sections.iter() {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for element in &section.elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    for child in &element.children {
        visitor.visit_element(child);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_project_mut<V: VisitorMut>(visitor: &mut V, project: &mut Project) {
    for page in &mut project.content.pages {
        visitor.visit_page_mut(page);
    }
    for section in project.content.sections.iter_mut() {
        visitor.visit_section_mut(section);
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut Section) {
    for element in &mut section.elements {
        visitor.visit_element_mut(element);
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    for child in &mut element.children {
        visitor.visit_element_mut(child);
    }
}

/// Collects every page, section and element id in tree order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub page_ids: Vec<String>,
    pub section_ids: Vec<String>,
    pub element_ids: Vec<String>,
}

impl IdCollector {
    pub fn collect(project: &Project) -> Self {
        let mut collector = Self::default();
        collector.visit_project(project);
        collector
    }

    /// All ids, pages first
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.page_ids
            .iter()
            .chain(&self.section_ids)
            .chain(&self.element_ids)
            .map(String::as_str)
    }

    /// Element ids that occur more than once
    pub fn duplicate_element_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.element_ids
            .iter()
            .filter(|id| !seen.insert(id.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Visitor for IdCollector {
    fn visit_page(&mut self, page: &Page) {
        self.page_ids.push(page.id.clone());
    }

    fn visit_section(&mut self, section: &Section) {
        self.section_ids.push(section.id.clone());
        walk_section(self, section);
    }

    fn visit_element(&mut self, element: &Element) {
        self.element_ids.push(element.id.clone());
        walk_element(self, element);
    }
}

/// Node counts for a project
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub pages: usize,
    pub sections: usize,
    pub elements: usize,
    pub max_depth: usize,
    depth: usize,
}

impl TreeStats {
    pub fn of(project: &Project) -> Self {
        let mut stats = Self::default();
        stats.visit_project(project);
        stats
    }
}

impl Visitor for TreeStats {
    fn visit_page(&mut self, _page: &Page) {
        self.pages += 1;
    }

    fn visit_section(&mut self, section: &Section) {
        self.sections += 1;
        walk_section(self, section);
    }

    fn visit_element(&mut self, element: &Element) {
        self.elements += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_element(self, element);
        self.depth -= 1;
    }
}
