/// Sanitizes path components by replacing filesystem-illegal characters.
///
/// Handles characters that are illegal on Windows and Unix:
/// - Windows: < > : " / \ | ? *
/// - Also handles trailing dots (Windows restriction)
pub struct PathSanitizer;

impl PathSanitizer {
    /// Characters that are illegal in file/directory names on Windows and Unix
    const ILLEGAL_CHARS: &'static [char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    /// Sanitize a single path component (file or directory name).
    ///
    /// Returns an empty string when nothing usable is left.
    ///
    /// # Examples
    /// ```
    /// use pathgen::PathSanitizer;
    ///
    /// assert_eq!(PathSanitizer::sanitize("Re:Zero"), "Re Zero");
    /// assert_eq!(PathSanitizer::sanitize("Show?<>Name"), "Show Name");
    /// ```
    pub fn sanitize(component: &str) -> String {
        let replaced: String = component
            .chars()
            .map(|ch| if Self::ILLEGAL_CHARS.contains(&ch) { ' ' } else { ch })
            .collect();

        // Compress runs of whitespace into one space
        let compressed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

        compressed.trim_end_matches('.').trim_end().to_string()
    }
}
