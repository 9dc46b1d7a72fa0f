/// Page identifier used when no keyword matches.
pub const DEFAULT_PAGE: &str = "memory";

/// Keyword rules in priority order. A path containing several keywords gets
/// the first one listed here.
const PAGE_RULES: &[(&str, &str)] = &[("vision", "vision"), ("jp-memory", "jp-memory")];

/// Pick the configuration block for a navigation path.
///
/// Matching is a case-insensitive substring test against each rule in order;
/// the first hit wins, otherwise [`DEFAULT_PAGE`].
pub fn resolve_page_id(path: &str) -> &'static str {
    let path = path.to_lowercase();
    PAGE_RULES
        .iter()
        .find(|(keyword, _)| path.contains(keyword))
        .map(|(_, page)| *page)
        .unwrap_or(DEFAULT_PAGE)
}
