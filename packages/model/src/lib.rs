//! # Sitekit Model
//!
//! Document tree for the site builder:
//!
//! ```text
//! Project
//!  └─ content
//!      ├─ pages:    [Page { sections: [section id, ...] }]   (references)
//!      ├─ sections: SectionTable { id → Section }            (ownership)
//!      │               └─ elements: [Element { children }]
//!      ├─ settings
//!      └─ globalStyles
//! ```
//!
//! Plus the pieces every editing operation builds on: the clone engine,
//! the element factory and the id generator.

pub mod clone;
pub mod defaults;
pub mod document;
pub mod element_type;
pub mod factory;
pub mod fields;
pub mod id_generator;
pub mod variants;

pub use clone::{fork, fork_project};
pub use defaults::Preset;
pub use document::{
    page_path, Element, Page, Project, ProjectContent, PropertyMap, Section, SectionTable,
    Settings, Theme,
};
pub use element_type::{ElementType, ElementTypeError, UNKNOWN_BASE};
pub use factory::{create_element, display_name, resolve_preset, BaseKind};
pub use fields::{bucket_of, FieldBucket};
pub use id_generator::IDGenerator;
pub use variants::variant_ids;
