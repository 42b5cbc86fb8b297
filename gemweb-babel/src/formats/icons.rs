//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a given node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "document" => "⧉",
        "heading" => "§",
        "paragraph" => "¶",
        "text" => "◦",
        "link" => "⊕",
        "list" => "☰",
        "list-item" => "•",
        "quote" => "\"",
        "preformatted" => "𝒱",
        "line" => "↵",
        _ => "○",
    }
}
