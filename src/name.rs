//! Class-like name handling.
//!
//! Component and handler names are `\`-separated paths in the style of
//! `App\Widgets\Fancy`. A leading `\` roots a name; rooted and unrooted
//! spellings of the same path are equivalent everywhere names are compared.

/// Whether a name already carries a namespace separator.
pub fn is_qualified(name: &str) -> bool {
    name.contains('\\')
}

/// Prefix a single root separator, leaving already-rooted names alone.
pub fn rooted(name: &str) -> String {
    if name.starts_with('\\') {
        name.to_owned()
    } else {
        format!("\\{name}")
    }
}

/// Join a namespace and a local name with exactly one separator.
pub fn join(namespace: &str, local: &str) -> String {
    let ns = namespace.trim_end_matches('\\');
    let local = local.trim_start_matches('\\');
    if ns.is_empty() {
        local.to_owned()
    } else {
        format!("{ns}\\{local}")
    }
}

/// Qualify a bare name with a base namespace.
///
/// Names that already contain a separator are returned unchanged; the base
/// only applies to bare local names.
pub fn qualify(name: &str, base: Option<&str>) -> String {
    match base {
        Some(base) if !is_qualified(name) => join(base, name),
        _ => name.to_owned(),
    }
}

/// Case-insensitive suffix match used for processor lookup.
///
/// `full` matches when it ends with `suffix`, comparing ASCII
/// case-insensitively. Root separators are not special here; callers strip
/// them before comparing when they want rooted-equals-unrooted semantics.
pub fn suffix_matches(full: &str, suffix: &str) -> bool {
    let full = full.to_ascii_lowercase();
    let suffix = suffix.to_ascii_lowercase();
    full.ends_with(&suffix)
}
