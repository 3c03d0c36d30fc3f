use xml::name::OwnedName;
use xml::ParserConfig;

use crate::SPARKLE_NAMESPACE;

/// Resolves an element or attribute name to the `prefix:localName` form the
/// tag dispatch matches on. Names in the Sparkle namespace qualify as
/// `sparkle:*` whether the document bound that prefix or another one.
pub fn qualified_name(name: &OwnedName) -> String {
    if name.prefix.as_deref() == Some("sparkle")
        || name.namespace.as_deref() == Some(SPARKLE_NAMESPACE)
    {
        format!("sparkle:{}", name.local_name)
    } else if let Some(prefix) = name.prefix.as_deref() {
        format!("{}:{}", prefix, name.local_name)
    } else {
        name.local_name.clone()
    }
}

pub fn clean_string(s: &str) -> String {
    s.trim().replace(['\r', '\n'], " ")
}

// Feed titles and descriptions routinely embed HTML entities that the XML
// engine does not predefine; register the common ones so they parse as text.
pub fn add_html_entities_to_parser_config(config: ParserConfig) -> ParserConfig {
    config
        .add_entity("amp", "&")
        .add_entity("lt", "<")
        .add_entity("gt", ">")
        .add_entity("nbsp", " ")
        .add_entity("copy", "©")
        .add_entity("reg", "®")
        .add_entity("trade", "™")
        .add_entity("deg", "°")
        .add_entity("ndash", "–")
        .add_entity("mdash", "—")
        .add_entity("lsquo", "‘")
        .add_entity("rsquo", "’")
        .add_entity("ldquo", "“")
        .add_entity("rdquo", "”")
        .add_entity("bull", "•")
        .add_entity("hellip", "…")
        .add_entity("euro", "€")
}
