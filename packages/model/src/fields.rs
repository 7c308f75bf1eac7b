//! Closed whitelist deciding whether a property belongs in `content` or `style`.

/// Which map of an element a property lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBucket {
    Content,
    Style,
}

/// Semantic fields
pub const CONTENT_FIELDS: &[&str] = &[
    "text",
    "level",
    "src",
    "alt",
    "href",
    "target",
    "buttonText",
    "label",
    "placeholder",
    "inputType",
    "icon",
    "caption",
    "title",
    "subtitle",
    "description",
    "items",
    "images",
    "links",
    "logo",
    "copyright",
    "videoUrl",
    "autoplay",
    "controls",
    "submitText",
    "fields",
    "ordered",
    "originalType",
];

/// Presentation fields
pub const STYLE_FIELDS: &[&str] = &[
    "color",
    "backgroundColor",
    "background",
    "backgroundImage",
    "fontSize",
    "fontWeight",
    "fontFamily",
    "fontStyle",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "textTransform",
    "textDecoration",
    "textShadow",
    "padding",
    "margin",
    "width",
    "height",
    "maxWidth",
    "minHeight",
    "border",
    "borderTop",
    "borderBottom",
    "borderRadius",
    "borderColor",
    "boxShadow",
    "display",
    "flexDirection",
    "flexWrap",
    "justifyContent",
    "alignItems",
    "gap",
    "gridTemplateColumns",
    "position",
    "top",
    "left",
    "zIndex",
    "opacity",
    "objectFit",
    "cursor",
    "transition",
    "transform",
    "clipPath",
    "overflow",
];

/// Bucket for a field name, or `None` if the field is not recognized
pub fn bucket_of(field: &str) -> Option<FieldBucket> {
    if CONTENT_FIELDS.contains(&field) {
        Some(FieldBucket::Content)
    } else if STYLE_FIELDS.contains(&field) {
        Some(FieldBucket::Style)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_are_disjoint() {
        for field in CONTENT_FIELDS {
            assert!(!STYLE_FIELDS.contains(field), "{} is in both buckets", field);
        }
    }

    #[test]
    fn test_bucket_lookup() {
        assert_eq!(bucket_of("text"), Some(FieldBucket::Content));
        assert_eq!(bucket_of("buttonText"), Some(FieldBucket::Content));
        assert_eq!(bucket_of("fontSize"), Some(FieldBucket::Style));
        assert_eq!(bucket_of("onClick"), None);
    }
}
