use crate::element_type::ElementType;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Free-form property bag used for element content, element style and global styles
pub type PropertyMap = Map<String, Value>;

/// Root of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: ProjectContent,
}

/// Everything a project owns. This is the unit exchanged with persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContent {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub sections: SectionTable,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub global_styles: PropertyMap,
}

/// A named route holding ordered section references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub sections: Vec<String>,
}

/// Ordered, owned collection of elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Smallest addressable visual unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default)]
    pub content: PropertyMap,
    #[serde(default)]
    pub style: PropertyMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "My Site".to_string(),
            favicon: String::new(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#10b981".to_string(),
            font_family: "Inter, sans-serif".to_string(),
        }
    }
}

/// Sections keyed by id, in insertion order.
///
/// Serialized as a plain array of sections so the persisted shape stays
/// `sections: [{ id, name, elements }, ...]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionTable {
    entries: IndexMap<String, Section>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section keyed by its own id. Replaces (in place) any section with the same id.
    pub fn insert(&mut self, section: Section) -> Option<Section> {
        self.entries.insert(section.id.clone(), section)
    }

    /// Remove a section, keeping the order of the remaining ones
    pub fn remove(&mut self, id: &str) -> Option<Section> {
        self.entries.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.entries.values_mut()
    }
}

impl FromIterator<Section> for SectionTable {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut table = SectionTable::new();
        for section in iter {
            table.insert(section);
        }
        table
    }
}

impl Serialize for SectionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de> Deserialize<'de> for SectionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sections = Vec::<Section>::deserialize(deserializer)?;
        Ok(sections.into_iter().collect())
    }
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut content = ProjectContent::default();
        content.settings.site_name = name.clone();

        Self {
            id: id.into(),
            name,
            content,
        }
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.content.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.content.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.content.sections.get(id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.content.sections.get_mut(id)
    }

    /// Find an element anywhere in the project, including nested children
    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.content
            .sections
            .iter()
            .find_map(|s| s.find_element(id))
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.content
            .sections
            .iter_mut()
            .find_map(|s| s.find_element_mut(id))
    }

    /// Id of the section that (directly or through nesting) holds the element
    pub fn section_of_element(&self, id: &str) -> Option<&str> {
        self.content
            .sections
            .iter()
            .find(|s| s.find_element(id).is_some())
            .map(|s| s.id.as_str())
    }

    /// Sections no page refers to
    pub fn orphaned_sections(&self) -> Vec<&str> {
        self.content
            .sections
            .ids()
            .filter(|id| {
                !self
                    .content
                    .pages
                    .iter()
                    .any(|p| p.sections.iter().any(|s| s == id))
            })
            .collect()
    }
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find_map(|e| e.find(id))
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find_map(|e| e.find_mut(id))
    }

    /// Number of elements in the section, counting nested children
    pub fn element_count(&self) -> usize {
        fn count(elements: &[Element]) -> usize {
            elements.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.elements)
    }
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            path: page_path(&name),
            name,
            sections: Vec::new(),
        }
    }
}

impl Element {
    /// This element or one of its descendants
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Whether the element carries explicit canvas coordinates
    pub fn has_position(&self) -> bool {
        self.style.contains_key("left") || self.style.contains_key("top")
    }

    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }

    pub fn style_str(&self, key: &str) -> Option<&str> {
        self.style.get(key).and_then(Value::as_str)
    }
}

/// Route path for a page name: `"About Us"` becomes `"/about-us"`
pub fn page_path(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    format!("/{}", slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heading(id: &str) -> Element {
        Element {
            id: id.to_string(),
            name: "Heading".to_string(),
            kind: "heading".parse().unwrap(),
            content: PropertyMap::new(),
            style: PropertyMap::new(),
            children: vec![],
        }
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("Home"), "/home");
        assert_eq!(page_path("About Us"), "/about-us");
        assert_eq!(page_path("  Contact   me! "), "/contact-me");
        assert_eq!(page_path(""), "/");
    }

    #[test]
    fn test_section_with_malformed_element_type_still_loads() {
        let mut section = Section::new("s", "Body");
        section.elements.push(heading("h"));
        section.elements.push(heading("broken"));

        let mut value = serde_json::to_value(&section).unwrap();
        value["elements"][1]["type"] = json!("");

        let back: Section = serde_json::from_value(value).unwrap();
        assert_eq!(back.elements[0].kind, "heading".parse().unwrap());
        assert_eq!(back.elements[1].kind.base, crate::UNKNOWN_BASE);
    }

    #[test]
    fn test_section_table_serializes_as_array() {
        let mut table = SectionTable::new();
        table.insert(Section::new("s-2", "Second"));
        table.insert(Section::new("s-1", "First"));

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            json!([
                { "id": "s-2", "name": "Second", "elements": [] },
                { "id": "s-1", "name": "First", "elements": [] }
            ])
        );

        let back: SectionTable = serde_json::from_value(value).unwrap();
        assert_eq!(back.ids().collect::<Vec<_>>(), vec!["s-2", "s-1"]);
    }

    #[test]
    fn test_section_table_remove_keeps_order() {
        let mut table: SectionTable = ["a", "b", "c"]
            .iter()
            .map(|id| Section::new(*id, *id))
            .collect();

        table.remove("b");
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_find_nested_element() {
        let mut container = heading("outer");
        container.children.push(heading("inner"));

        let mut project = Project::new("p", "Site");
        let mut section = Section::new("s", "Hero");
        section.elements.push(container);
        project.content.sections.insert(section);

        assert!(project.find_element("inner").is_some());
        assert_eq!(project.section_of_element("inner"), Some("s"));
        assert!(project.find_element("missing").is_none());
    }

    #[test]
    fn test_project_content_shape() {
        let project = Project::new("p", "Site");
        let value = serde_json::to_value(&project.content).unwrap();

        assert_eq!(value["pages"], json!([]));
        assert_eq!(value["sections"], json!([]));
        assert_eq!(value["settings"]["siteName"], json!("Site"));
        assert_eq!(value["settings"]["theme"]["primaryColor"], json!("#3b82f6"));
        assert_eq!(value["globalStyles"], json!({}));
    }

    #[test]
    fn test_orphaned_sections() {
        let mut project = Project::new("p", "Site");
        project.content.sections.insert(Section::new("kept", "Kept"));
        project.content.sections.insert(Section::new("loose", "Loose"));
        let mut page = Page::new("home", "Home");
        page.sections.push("kept".to_string());
        project.content.pages.push(page);

        assert_eq!(project.orphaned_sections(), vec!["loose"]);
    }
}
