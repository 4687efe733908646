/// Longest stored filename, extension included.
pub const MAX_FILENAME_LEN: usize = 200;

/// Image types accepted for profile and logo uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Returns the text after the last `.` of a filename, if any.
pub fn extension(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Case-insensitive check against [`ALLOWED_IMAGE_EXTENSIONS`].
pub fn has_allowed_extension(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| {
        ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Reduce an uploaded filename to a flat, portable name.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// stripped. Names longer than [`MAX_FILENAME_LEN`] lose the end of their stem
/// and keep the extension. Returns `None` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let spaced = filename.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(truncate_stem(trimmed))
    }
}

// `name` is ASCII here, so byte slicing stays on char boundaries.
fn truncate_stem(name: &str) -> String {
    if name.len() <= MAX_FILENAME_LEN {
        return name.to_string();
    }
    match extension(name) {
        Some(ext) if ext.len() < MAX_FILENAME_LEN / 2 => {
            let stem = &name[..MAX_FILENAME_LEN - ext.len() - 1];
            format!("{}.{ext}", stem.trim_end_matches(['.', '_']))
        }
        _ => name[..MAX_FILENAME_LEN]
            .trim_end_matches(['.', '_'])
            .to_string(),
    }
}
