//! File naming: `Button.mist.css` → component `Button` → `Button.mist.css.tsx`.

use std::path::{Path, PathBuf};

/// Suffix of component stylesheets.
pub const EXTENSION: &str = ".mist.css";

/// Whether `path` names a component stylesheet.
pub fn is_mist_file(path: &Path) -> bool {
    component_name(path).is_some()
}

/// Component name for a stylesheet path, the file name without `.mist.css`.
pub fn component_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.strip_suffix(EXTENSION)?;
    (!name.is_empty()).then_some(name)
}

/// Where the generated component is written: next to the stylesheet, with
/// `.tsx` appended.
pub fn output_path(path: &Path) -> PathBuf {
    let mut output = path.as_os_str().to_os_string();
    output.push(".tsx");
    PathBuf::from(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_component_name() {
        assert_eq!(component_name(Path::new("Button.mist.css")), Some("Button"));
        assert_eq!(
            component_name(Path::new("src/components/Card.mist.css")),
            Some("Card")
        );
    }

    #[test]
    fn test_component_name_rejects_other_files() {
        assert_eq!(component_name(Path::new("Button.css")), None);
        assert_eq!(component_name(Path::new(".mist.css")), None);
        assert_eq!(component_name(Path::new("Button.mist.css.tsx")), None);
        assert_eq!(component_name(Path::new("")), None);
    }

    #[test]
    fn test_is_mist_file() {
        assert!(is_mist_file(Path::new("a/Button.mist.css")));
        assert!(!is_mist_file(Path::new("a/button.css")));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("src/Button.mist.css")),
            PathBuf::from("src/Button.mist.css.tsx")
        );
    }
}
