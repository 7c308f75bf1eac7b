//! # Element Factory
//!
//! Builds new elements from an [`ElementType`]:
//!
//! 1. Look up the base type's default content and style
//! 2. If a variant is given, overlay that variant's preset
//!
//! The factory never fails. An unknown base type produces a diagnostic
//! `text` element; an unknown variant of a known base produces the base's
//! plain defaults.

use crate::defaults::{defaults_for, fallback_for, Preset};
use crate::document::Element;
use crate::element_type::ElementType;
use crate::id_generator::IDGenerator;
use crate::variants::variant_preset;

/// Base types the factory knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    Heading,
    Text,
    Image,
    Button,
    CyberButton,
    Link,
    Container,
    Divider,
    Spacer,
    Video,
    Icon,
    List,
    Card,
    Input,
    Form,
    Navbar,
    Footer,
    Gallery,
}

impl BaseKind {
    pub const ALL: &'static [BaseKind] = &[
        BaseKind::Heading,
        BaseKind::Text,
        BaseKind::Image,
        BaseKind::Button,
        BaseKind::CyberButton,
        BaseKind::Link,
        BaseKind::Container,
        BaseKind::Divider,
        BaseKind::Spacer,
        BaseKind::Video,
        BaseKind::Icon,
        BaseKind::List,
        BaseKind::Card,
        BaseKind::Input,
        BaseKind::Form,
        BaseKind::Navbar,
        BaseKind::Footer,
        BaseKind::Gallery,
    ];

    /// Base type used for diagnostic elements
    pub const FALLBACK: BaseKind = BaseKind::Text;

    pub fn token(self) -> &'static str {
        match self {
            BaseKind::Heading => "heading",
            BaseKind::Text => "text",
            BaseKind::Image => "image",
            BaseKind::Button => "button",
            BaseKind::CyberButton => "cyber-button",
            BaseKind::Link => "link",
            BaseKind::Container => "container",
            BaseKind::Divider => "divider",
            BaseKind::Spacer => "spacer",
            BaseKind::Video => "video",
            BaseKind::Icon => "icon",
            BaseKind::List => "list",
            BaseKind::Card => "card",
            BaseKind::Input => "input",
            BaseKind::Form => "form",
            BaseKind::Navbar => "navbar",
            BaseKind::Footer => "footer",
            BaseKind::Gallery => "gallery",
        }
    }

    pub fn from_base(base: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.token() == base)
    }
}

/// Human-readable name for a base type token: `"cyber-button"` becomes `"Cyber Button"`
pub fn display_name(base: &str) -> String {
    base.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve the content/style a new element of this type starts with.
///
/// Returns the type the element will actually carry, which differs from the
/// request when the base or the variant is unknown.
pub fn resolve_preset(kind: &ElementType) -> (ElementType, Preset) {
    let Some(base) = BaseKind::from_base(&kind.base) else {
        tracing::warn!(element_type = %kind, "unknown element type, building fallback");
        return (ElementType::new(BaseKind::FALLBACK.token()), fallback_for(&kind.base));
    };

    let mut preset = defaults_for(base);

    match kind.variant.as_deref() {
        None => (kind.clone(), preset),
        Some(variant) => match variant_preset(base, variant) {
            Some(overrides) => {
                preset.merge(overrides);
                (kind.clone(), preset)
            }
            None => {
                tracing::warn!(
                    element_type = %kind,
                    "unknown variant, using base defaults"
                );
                (kind.without_variant(), preset)
            }
        },
    }
}

/// Build a new element with a fresh id
pub fn create_element(kind: &ElementType, ids: &mut IDGenerator) -> Element {
    let (resolved, preset) = resolve_preset(kind);

    let name = if BaseKind::from_base(&kind.base).is_some() {
        display_name(&kind.base)
    } else {
        "Unknown Element".to_string()
    };

    Element {
        id: ids.new_id(),
        name,
        kind: resolved,
        content: preset.content,
        style: preset.style,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{bucket_of, FieldBucket};
    use crate::variants::variant_ids;
    use serde_json::json;

    fn build(token: &str) -> Element {
        let mut ids = IDGenerator::from_seed("test".to_string());
        create_element(&token.parse().unwrap(), &mut ids)
    }

    #[test]
    fn test_heading_defaults() {
        let el = build("heading");

        assert_eq!(el.kind.to_string(), "heading");
        assert_eq!(el.name, "Heading");
        assert_eq!(el.content["text"], json!("New Heading"));
        assert_eq!(el.content["level"], json!("h2"));
        assert_eq!(el.style["fontSize"], json!("2rem"));
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_variant_overrides_defaults() {
        let el = build("cyber-button:cb-3");

        assert_eq!(el.kind.to_string(), "cyber-button:cb-3");
        assert_eq!(el.name, "Cyber Button");
        assert_eq!(el.style["border"], json!("1px solid #f0e000"));
        assert!(el.style["background"].as_str().unwrap().contains("linear-gradient"));
        // untouched defaults survive the overlay
        assert_eq!(el.style["padding"], json!("14px 32px"));
        assert_eq!(el.content["buttonText"], json!("ENTER THE GRID"));
    }

    #[test]
    fn test_unknown_variant_falls_back_to_same_base() {
        let plain = build("cyber-button");
        let el = build("cyber-button:cb-99");

        assert_eq!(el.kind.to_string(), "cyber-button");
        assert_eq!(el.content, plain.content);
        assert_eq!(el.style, plain.style);
    }

    #[test]
    fn test_unknown_base_builds_diagnostic_element() {
        let el = build("bad-type");

        assert_eq!(el.kind.base, "text");
        assert_eq!(el.name, "Unknown Element");
        assert_eq!(el.content["text"], json!("Unknown element type: bad-type"));
        assert_eq!(el.content["originalType"], json!("bad-type"));
        assert!(el.style["border"].as_str().unwrap().contains("#ef4444"));
    }

    #[test]
    fn test_each_element_gets_a_fresh_id() {
        let mut ids = IDGenerator::from_seed("test".to_string());
        let kind: ElementType = "text".parse().unwrap();
        let a = create_element(&kind, &mut ids);
        let b = create_element(&kind, &mut ids);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("heading"), "Heading");
        assert_eq!(display_name("cyber-button"), "Cyber Button");
        assert_eq!(display_name("nav_bar"), "Nav Bar");
    }

    #[test]
    fn test_presets_respect_field_buckets() {
        let mut kinds: Vec<ElementType> = Vec::new();
        for kind in BaseKind::ALL {
            kinds.push(ElementType::new(kind.token()));
            for variant in variant_ids(*kind) {
                kinds.push(ElementType::with_variant(kind.token(), *variant));
            }
        }

        for kind in kinds {
            let (_, preset) = resolve_preset(&kind);
            for key in preset.content.keys() {
                assert_eq!(bucket_of(key), Some(FieldBucket::Content), "{}: {}", kind, key);
            }
            for key in preset.style.keys() {
                assert_eq!(bucket_of(key), Some(FieldBucket::Style), "{}: {}", kind, key);
            }
        }
    }
}
