//! Casing helpers for the `string` type

/// Capitalize the first letter of each space-separated word, lowercase the rest
pub fn title_case(s: &str) -> String {
    s.split(' ').map(first_case).collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter, lowercase the rest
pub fn first_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
