use crate::document::PropertyMap;
use crate::factory::BaseKind;
use serde_json::{json, Value};

/// Content and style values applied to a freshly created element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preset {
    pub content: PropertyMap,
    pub style: PropertyMap,
}

impl Preset {
    pub(crate) fn new(content: Value, style: Value) -> Self {
        Self {
            content: into_map(content),
            style: into_map(style),
        }
    }

    /// Overlay another preset, key by key
    pub fn merge(&mut self, other: Preset) {
        self.content.extend(other.content);
        self.style.extend(other.style);
    }
}

fn into_map(value: Value) -> PropertyMap {
    match value {
        Value::Object(map) => map,
        _ => PropertyMap::new(),
    }
}

/// Un-varied defaults for a base type
pub fn defaults_for(kind: BaseKind) -> Preset {
    match kind {
        BaseKind::Heading => Preset::new(
            json!({ "text": "New Heading", "level": "h2" }),
            json!({
                "fontSize": "2rem",
                "fontWeight": "700",
                "color": "#111827",
                "textAlign": "left",
                "margin": "0 0 16px 0"
            }),
        ),
        BaseKind::Text => Preset::new(
            json!({ "text": "Add your text here. Click to edit." }),
            json!({
                "fontSize": "1rem",
                "lineHeight": "1.6",
                "color": "#374151",
                "margin": "0 0 16px 0"
            }),
        ),
        BaseKind::Image => Preset::new(
            json!({
                "src": "https://placehold.co/800x400",
                "alt": "Image description"
            }),
            json!({
                "width": "100%",
                "height": "auto",
                "objectFit": "cover",
                "borderRadius": "8px"
            }),
        ),
        BaseKind::Button => Preset::new(
            json!({ "buttonText": "Click Me", "href": "#" }),
            json!({
                "backgroundColor": "#3b82f6",
                "color": "#ffffff",
                "padding": "12px 24px",
                "borderRadius": "6px",
                "border": "none",
                "fontSize": "1rem",
                "fontWeight": "600",
                "cursor": "pointer"
            }),
        ),
        BaseKind::CyberButton => Preset::new(
            json!({ "buttonText": "ENTER THE GRID", "href": "#" }),
            json!({
                "backgroundColor": "#0a0a0f",
                "color": "#00f0ff",
                "border": "2px solid #00f0ff",
                "padding": "14px 32px",
                "fontFamily": "'Orbitron', monospace",
                "fontSize": "1rem",
                "letterSpacing": "0.15em",
                "textTransform": "uppercase",
                "cursor": "pointer",
                "transition": "all 0.2s ease"
            }),
        ),
        BaseKind::Link => Preset::new(
            json!({ "text": "Learn more", "href": "#", "target": "_self" }),
            json!({ "color": "#3b82f6", "textDecoration": "underline" }),
        ),
        BaseKind::Container => Preset::new(
            json!({}),
            json!({
                "display": "flex",
                "flexDirection": "column",
                "gap": "16px",
                "padding": "24px",
                "width": "100%"
            }),
        ),
        BaseKind::Divider => Preset::new(
            json!({}),
            json!({
                "borderTop": "1px solid #e5e7eb",
                "margin": "24px 0",
                "width": "100%"
            }),
        ),
        BaseKind::Spacer => Preset::new(json!({}), json!({ "height": "48px", "width": "100%" })),
        BaseKind::Video => Preset::new(
            json!({
                "videoUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ",
                "autoplay": false,
                "controls": true
            }),
            json!({ "width": "100%", "height": "400px", "borderRadius": "8px" }),
        ),
        BaseKind::Icon => Preset::new(
            json!({ "icon": "star", "label": "Icon" }),
            json!({ "fontSize": "2rem", "color": "#3b82f6" }),
        ),
        BaseKind::List => Preset::new(
            json!({ "items": ["First item", "Second item", "Third item"], "ordered": false }),
            json!({ "padding": "0 0 0 24px", "lineHeight": "1.8", "color": "#374151" }),
        ),
        BaseKind::Card => Preset::new(
            json!({
                "title": "Card Title",
                "description": "A short description of this card.",
                "src": "https://placehold.co/400x240",
                "buttonText": "Read more"
            }),
            json!({
                "backgroundColor": "#ffffff",
                "borderRadius": "12px",
                "padding": "24px",
                "boxShadow": "0 4px 6px rgba(0, 0, 0, 0.1)",
                "maxWidth": "360px"
            }),
        ),
        BaseKind::Input => Preset::new(
            json!({ "label": "Email", "placeholder": "you@example.com", "inputType": "email" }),
            json!({
                "padding": "10px 14px",
                "border": "1px solid #d1d5db",
                "borderRadius": "6px",
                "fontSize": "1rem",
                "width": "100%"
            }),
        ),
        BaseKind::Form => Preset::new(
            json!({
                "title": "Contact us",
                "fields": ["name", "email", "message"],
                "submitText": "Send"
            }),
            json!({
                "display": "flex",
                "flexDirection": "column",
                "gap": "12px",
                "padding": "24px",
                "maxWidth": "480px"
            }),
        ),
        BaseKind::Navbar => Preset::new(
            json!({
                "logo": "My Site",
                "links": [
                    { "label": "Home", "href": "/home" },
                    { "label": "About", "href": "/about" },
                    { "label": "Contact", "href": "/contact" }
                ]
            }),
            json!({
                "display": "flex",
                "justifyContent": "space-between",
                "alignItems": "center",
                "padding": "16px 32px",
                "backgroundColor": "#ffffff",
                "boxShadow": "0 1px 2px rgba(0, 0, 0, 0.05)"
            }),
        ),
        BaseKind::Footer => Preset::new(
            json!({ "copyright": "© My Site. All rights reserved." }),
            json!({
                "padding": "32px",
                "backgroundColor": "#111827",
                "color": "#9ca3af",
                "textAlign": "center",
                "fontSize": "0.875rem"
            }),
        ),
        BaseKind::Gallery => Preset::new(
            json!({
                "images": [
                    "https://placehold.co/300x300",
                    "https://placehold.co/300x300",
                    "https://placehold.co/300x300"
                ]
            }),
            json!({
                "display": "grid",
                "gridTemplateColumns": "repeat(3, 1fr)",
                "gap": "12px"
            }),
        ),
    }
}

/// Diagnostic preset for a base type nobody knows how to build
pub fn fallback_for(base: &str) -> Preset {
    Preset::new(
        json!({
            "text": format!("Unknown element type: {}", base),
            "originalType": base
        }),
        json!({
            "border": "2px dashed #ef4444",
            "color": "#ef4444",
            "padding": "12px",
            "backgroundColor": "#fef2f2"
        }),
    )
}
