use once_cell::sync::Lazy;
use regex::Regex;

static SOURCE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\.d)?\.(ts|tsx|mts|cts|js|jsx|mjs)$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a source extension (`.ts`, `.tsx`, `.d.ts`, `.js`, ...) from a file name.
pub fn strip_extension(path: &str) -> String {
    SOURCE_EXTENSION.replace(path, "").to_string()
}

pub fn is_source_file(path: &str) -> bool {
    SOURCE_EXTENSION.is_match(path) && !path.ends_with(".d.ts")
}

/// Normalize `.` and `..` segments and separators. Leading `..` segments of a
/// relative path are kept.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);
    let is_absolute = normalized.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !is_absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Module specifier that imports `to_file` from a module located at `from_file`,
/// e.g. `relative_import_path("src/.di/di-config.ts", "src/services/Api.ts")` is
/// `../services/Api`.
pub fn relative_import_path(from_file: &str, to_file: &str) -> String {
    let from = clean_path(from_file);
    let to = clean_path(&strip_extension(to_file));

    let mut from_dir: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    from_dir.pop();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_dir
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let rest = to_segments[common..].join("/");
    if ups == 0 {
        format!("./{}", rest)
    } else {
        format!("{}{}", "../".repeat(ups), rest)
    }
}
