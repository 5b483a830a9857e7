//! Path helpers: output name checks and quoting for ffmpeg syntaxes

use std::path::{Component, Path};

use crate::domain::errors::DomainError;

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Output names are bare file names; they may not climb out of the
    /// upload directory or name a directory of their own.
    pub fn validate_output_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::BadArgs("Output name cannot be empty".to_string()));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(DomainError::BadArgs(format!(
                "Output name must not contain path separators: {}",
                name
            )));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(DomainError::BadArgs(format!(
                "Output name must be a plain file name: {}",
                name
            ))),
        }
    }

    /// Lowercased extension of `path`, or `default` when it has none
    pub fn extension_or(path: &Path, default: &str) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// File stem used to derive companion outputs (audio, subtitles)
    pub fn stem_or(path: &Path, default: &str) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Quote a path for a concat demuxer manifest line. Inside single quotes
    /// the only special character is the quote itself, written as `'\''`.
    pub fn concat_manifest_line(path: &Path) -> String {
        let raw = path.to_string_lossy();
        format!("file '{}'", raw.replace('\'', "'\\''"))
    }

    /// Escape a path used as an option value inside a filtergraph, e.g.
    /// `subtitles=<path>`. Two escaping levels apply: the filter option
    /// parser (backslash, colon, quote) and then the graph parser (backslash,
    /// quote, comma, semicolon, brackets).
    pub fn escape_filter_value(path: &Path) -> String {
        let raw = path.to_string_lossy();
        let option_level = escape_chars(&raw, &['\\', ':', '\'']);
        escape_chars(&option_level, &['\\', '\'', ',', ';', '[', ']'])
    }
}

fn escape_chars(input: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if special.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_output_name() {
        assert!(PathUtils::validate_output_name("clip.mp4").is_ok());
        assert!(PathUtils::validate_output_name("my clip (1).mp4").is_ok());
        assert!(PathUtils::validate_output_name("").is_err());
        assert!(PathUtils::validate_output_name("..").is_err());
        assert!(PathUtils::validate_output_name(".").is_err());
        assert!(PathUtils::validate_output_name("../escape.mp4").is_err());
        assert!(PathUtils::validate_output_name("/etc/passwd").is_err());
        assert!(PathUtils::validate_output_name("dir\\clip.mp4").is_err());
    }

    #[test]
    fn test_extension_and_stem() {
        assert_eq!(PathUtils::extension_or(Path::new("a/Movie.MKV"), "mp4"), "mkv");
        assert_eq!(PathUtils::extension_or(Path::new("a/movie"), "mp4"), "mp4");
        assert_eq!(PathUtils::stem_or(Path::new("a/movie.mkv"), "video"), "movie");
    }

    #[test]
    fn test_concat_manifest_line_escapes_quotes() {
        assert_eq!(
            PathUtils::concat_manifest_line(Path::new("/up/it's.mp4")),
            "file '/up/it'\\''s.mp4'"
        );
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(
            PathUtils::escape_filter_value(Path::new("/up/a:b,c's.srt")),
            r"/up/a\\:b\,c\\\'s.srt"
        );
    }
}
