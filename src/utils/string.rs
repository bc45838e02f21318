//! String formatting utilities.

/// Convert a kebab-case name to Title Case.
///
/// # Examples
/// ```
/// use docroute::utils::string::kebab_to_title_case;
/// assert_eq!(kebab_to_title_case("getting-started"), "Getting Started");
/// assert_eq!(kebab_to_title_case("api"), "Api");
/// ```
pub fn kebab_to_title_case(name: &str) -> String {
    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
