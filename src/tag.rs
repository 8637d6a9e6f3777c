use std::path::Path;

/// Derives the log tag for a source file.
///
/// The tag is the file's base name with the extension stripped, converted
/// from snake_case to PascalCase: split on `_`, capitalize each word's first
/// letter, concatenate with no separator.
///
/// There are no error conditions. Empty or malformed names produce an empty
/// or degenerate tag; the result is not validated.
pub fn log_tag(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    stem.split('_').map(capitalize).collect()
}

/// Uppercases the first character of a word, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_to_pascal_case() {
        assert_eq!(log_tag(Path::new("onboarding_screen.dart")), "OnboardingScreen");
        assert_eq!(log_tag(Path::new("auth_provider.dart")), "AuthProvider");
    }

    #[test]
    fn test_single_word_name() {
        assert_eq!(log_tag(Path::new("main.dart")), "Main");
    }

    #[test]
    fn test_full_path_uses_base_name_only() {
        assert_eq!(
            log_tag(Path::new("lib/services/firebase_service.dart")),
            "FirebaseService"
        );
    }

    #[test]
    fn test_degenerate_names_are_not_validated() {
        assert_eq!(log_tag(Path::new("_.dart")), "");
        assert_eq!(log_tag(Path::new("__init__.dart")), "Init");
        assert_eq!(log_tag(Path::new("")), "");
    }
}
