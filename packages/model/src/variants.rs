use crate::defaults::Preset;
use crate::factory::BaseKind;
use serde_json::json;

/// Variant ids understood for a base type
pub fn variant_ids(kind: BaseKind) -> &'static [&'static str] {
    match kind {
        BaseKind::Heading => &["h-1", "h-2", "h-3"],
        BaseKind::Text => &["lead", "muted"],
        BaseKind::Button => &["btn-1", "btn-2", "btn-3", "btn-4"],
        BaseKind::CyberButton => &["cb-1", "cb-2", "cb-3", "cb-4", "cb-5"],
        BaseKind::Card => &["card-1", "card-2", "card-3"],
        BaseKind::Container => &["row", "grid-3"],
        _ => &[],
    }
}

/// Named preset overriding a base type's defaults
pub fn variant_preset(kind: BaseKind, variant: &str) -> Option<Preset> {
    let preset = match (kind, variant) {
        (BaseKind::Heading, "h-1") => Preset::new(
            json!({ "level": "h1" }),
            json!({ "fontSize": "3.5rem", "fontWeight": "800", "letterSpacing": "-0.02em" }),
        ),
        (BaseKind::Heading, "h-2") => Preset::new(
            json!({}),
            json!({ "borderBottom": "3px solid #3b82f6", "padding": "0 0 8px 0" }),
        ),
        (BaseKind::Heading, "h-3") => Preset::new(
            json!({ "level": "h4" }),
            json!({
                "fontSize": "0.875rem",
                "textTransform": "uppercase",
                "letterSpacing": "0.2em",
                "color": "#6b7280"
            }),
        ),

        (BaseKind::Text, "lead") => Preset::new(
            json!({}),
            json!({ "fontSize": "1.25rem", "color": "#1f2937" }),
        ),
        (BaseKind::Text, "muted") => Preset::new(
            json!({}),
            json!({ "fontSize": "0.875rem", "color": "#9ca3af" }),
        ),

        (BaseKind::Button, "btn-1") => Preset::new(
            json!({ "buttonText": "Get Started" }),
            json!({ "backgroundColor": "#111827", "color": "#ffffff" }),
        ),
        (BaseKind::Button, "btn-2") => Preset::new(
            json!({}),
            json!({
                "backgroundColor": "transparent",
                "color": "#3b82f6",
                "border": "2px solid #3b82f6"
            }),
        ),
        (BaseKind::Button, "btn-3") => Preset::new(
            json!({}),
            json!({ "borderRadius": "9999px", "padding": "12px 32px" }),
        ),
        (BaseKind::Button, "btn-4") => Preset::new(
            json!({}),
            json!({
                "backgroundColor": "transparent",
                "color": "#374151",
                "textDecoration": "underline"
            }),
        ),

        (BaseKind::CyberButton, "cb-1") => Preset::new(
            json!({}),
            json!({
                "color": "#00f0ff",
                "border": "2px solid #00f0ff",
                "boxShadow": "0 0 12px #00f0ff, inset 0 0 12px rgba(0, 240, 255, 0.3)"
            }),
        ),
        (BaseKind::CyberButton, "cb-2") => Preset::new(
            json!({ "buttonText": "JACK IN" }),
            json!({
                "color": "#ff00aa",
                "border": "2px solid #ff00aa",
                "textShadow": "2px 0 #00f0ff, -2px 0 #ff00aa"
            }),
        ),
        (BaseKind::CyberButton, "cb-3") => Preset::new(
            json!({}),
            json!({
                "border": "1px solid #f0e000",
                "background": "linear-gradient(135deg, #1a0033 0%, #330066 50%, #f0e000 100%)",
                "color": "#f0e000",
                "boxShadow": "0 0 20px rgba(240, 224, 0, 0.5)"
            }),
        ),
        (BaseKind::CyberButton, "cb-4") => Preset::new(
            json!({ "buttonText": "WAKE UP" }),
            json!({
                "color": "#00ff41",
                "backgroundColor": "#000000",
                "border": "1px solid #00ff41",
                "fontFamily": "'Courier New', monospace"
            }),
        ),
        (BaseKind::CyberButton, "cb-5") => Preset::new(
            json!({}),
            json!({
                "clipPath": "polygon(10% 0, 100% 0, 90% 100%, 0 100%)",
                "backgroundColor": "#00f0ff",
                "color": "#0a0a0f",
                "border": "none"
            }),
        ),

        (BaseKind::Card, "card-1") => Preset::new(
            json!({}),
            json!({ "boxShadow": "0 20px 25px rgba(0, 0, 0, 0.15)", "borderRadius": "16px" }),
        ),
        (BaseKind::Card, "card-2") => Preset::new(
            json!({}),
            json!({ "boxShadow": "none", "border": "1px solid #e5e7eb" }),
        ),
        (BaseKind::Card, "card-3") => Preset::new(
            json!({}),
            json!({
                "backgroundColor": "rgba(255, 255, 255, 0.1)",
                "border": "1px solid rgba(255, 255, 255, 0.2)",
                "color": "#ffffff"
            }),
        ),

        (BaseKind::Container, "row") => Preset::new(
            json!({}),
            json!({ "flexDirection": "row", "alignItems": "center" }),
        ),
        (BaseKind::Container, "grid-3") => Preset::new(
            json!({}),
            json!({ "display": "grid", "gridTemplateColumns": "repeat(3, 1fr)" }),
        ),

        _ => return None,
    };

    Some(preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_variant_has_a_preset() {
        for kind in BaseKind::ALL {
            for variant in variant_ids(*kind) {
                assert!(
                    variant_preset(*kind, variant).is_some(),
                    "{:?} lists {} without a preset",
                    kind,
                    variant
                );
            }
        }
    }

    #[test]
    fn test_variant_ids_do_not_cross_base_types() {
        assert!(variant_preset(BaseKind::Button, "cb-3").is_none());
        assert!(variant_preset(BaseKind::CyberButton, "btn-1").is_none());
    }
}
