use std::fmt;

use serde::{Deserialize, Serialize};

/// The base a file element's `path` is resolved against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceTree {
    /// Relative to the enclosing group (`<group>`).
    #[default]
    Group,
    /// Absolute filesystem path (`<absolute>`).
    Absolute,
    /// Relative to the project directory (`SOURCE_ROOT`).
    SourceRoot,
    /// Relative to the build products directory (`BUILT_PRODUCTS_DIR`).
    BuildProductsDir,
    /// Relative to the active SDK (`SDKROOT`).
    SdkRoot,
    /// Relative to the developer directory (`DEVELOPER_DIR`).
    DeveloperDir,
    /// Any other build-setting variable.
    Variable(String),
}

impl SourceTree {
    /// The literal used in project files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Group => "<group>",
            Self::Absolute => "<absolute>",
            Self::SourceRoot => "SOURCE_ROOT",
            Self::BuildProductsDir => "BUILT_PRODUCTS_DIR",
            Self::SdkRoot => "SDKROOT",
            Self::DeveloperDir => "DEVELOPER_DIR",
            Self::Variable(name) => name,
        }
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_group() {
        assert_eq!(SourceTree::default(), SourceTree::Group);
    }

    #[test]
    fn literals_use_project_file_spelling() {
        assert_eq!(SourceTree::Group.as_str(), "<group>");
        assert_eq!(SourceTree::Absolute.as_str(), "<absolute>");
        assert_eq!(SourceTree::SourceRoot.to_string(), "SOURCE_ROOT");
        assert_eq!(SourceTree::BuildProductsDir.as_str(), "BUILT_PRODUCTS_DIR");
    }

    #[test]
    fn variable_prints_its_name() {
        let tree = SourceTree::Variable("PLATFORM_DIR".into());
        assert_eq!(tree.to_string(), "PLATFORM_DIR");
    }
}
