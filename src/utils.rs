/// Upper-cases the first character; display only, never used for comparison.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn checkbox_glyph(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
