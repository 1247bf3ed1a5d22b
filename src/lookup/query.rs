/// Derive a search query from an audio file path.
///
/// Takes the base name (either `/` or `\` separated), drops the extension,
/// turns `-` and `_` into spaces and collapses runs of whitespace.
pub fn query_from_path(file_path: &str) -> String {
    let name = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path);

    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
