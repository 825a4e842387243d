use crate::{PathGenError, PathSanitizer, Result};

/// Builder for download destination paths
///
/// # Examples
///
/// ```
/// use pathgen::PathBuilder;
///
/// let path = PathBuilder::new()
///     .with_prefix("/media/anime")
///     .build_file("One Piece", "One_Piece_Ep_1050_SUB_ITA.mp4")
///     .unwrap();
///
/// assert_eq!(path, "/media/anime/o/one piece/One_Piece_Ep_1050_SUB_ITA.mp4");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    prefix: String,
}

impl PathBuilder {
    /// Create a new path builder with an empty prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix every generated path starts with
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Build the destination directory, always ending in `/`
    pub fn build_directory(&self, name: &str) -> Result<String> {
        let name = PathSanitizer::sanitize(name).to_lowercase();
        let initial = name
            .chars()
            .next()
            .ok_or_else(|| PathGenError::InvalidComponent(name.clone()))?;

        let mut path = self.prefix.clone();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        path.push(initial);
        path.push('/');
        path.push_str(&name);
        path.push('/');

        Ok(path)
    }

    /// Build the destination directory plus a file name
    pub fn build_file(&self, name: &str, file_name: &str) -> Result<String> {
        let file_name = PathSanitizer::sanitize(file_name);
        if file_name.is_empty() {
            return Err(PathGenError::InvalidComponent(file_name));
        }

        let mut path = self.build_directory(name)?;
        path.push_str(&file_name);
        Ok(path)
    }
}
