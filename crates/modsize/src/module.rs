//! Module declarations and file classification.
//!
//! A file belongs to the first declared module whose directory contains it,
//! compared segment by segment. A module at `orders` therefore claims
//! `orders/Order.java` but not `orders-extra/Order.java`. Files claimed by no
//! module fall into the [`Module::Undefined`] bucket.

use std::fmt;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Name reported for files that match no declared module.
pub const UNDEFINED_MODULE_NAME: &str = "undefined";

/// A classification target for scanned files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Module {
    /// A user-declared module rooted at a project-relative directory.
    Defined {
        /// Public identifier of the module.
        name: String,
        /// Directory relative to the project root.
        directory: Utf8PathBuf,
    },
    /// Catch-all bucket for files outside every declared module.
    Undefined,
}

impl Module {
    /// Declare a module from a dotted package name such as `pl.tfij.orders`.
    ///
    /// The directory is the package with each `.` replaced by a separator.
    pub fn package(name: impl Into<String>) -> Self {
        let name = name.into();
        let directory: Utf8PathBuf = name.split('.').filter(|s| !s.is_empty()).collect();
        Self::Defined { name, directory }
    }

    /// Declare a module from a project-relative directory.
    ///
    /// The module is named after the path exactly as given.
    pub fn directory(path: impl AsRef<Utf8Path>) -> Self {
        let path = path.as_ref();
        Self::Defined {
            name: path.as_str().to_string(),
            directory: path.to_path_buf(),
        }
    }

    /// The module's public name.
    pub fn name(&self) -> &str {
        match self {
            Self::Defined { name, .. } => name,
            Self::Undefined => UNDEFINED_MODULE_NAME,
        }
    }

    /// The module's directory, or `None` for the undefined bucket.
    pub fn dir(&self) -> Option<&Utf8Path> {
        match self {
            Self::Defined { directory, .. } => Some(directory),
            Self::Undefined => None,
        }
    }

    /// Returns `true` for the undefined bucket.
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether `path` lies at or under this module's directory.
    ///
    /// Always `false` for [`Module::Undefined`].
    pub fn contains(&self, path: &Utf8Path) -> bool {
        let Some(dir) = self.dir() else {
            return false;
        };
        let mut file_segments = segments(path);
        segments(dir).all(|seg| file_segments.next() == Some(seg))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the module a root-relative file path belongs to.
///
/// Returns the first declared module (in declaration order) containing the
/// path, or [`Module::Undefined`].
pub fn match_module(path: &Utf8Path, modules: &[Module]) -> Module {
    modules
        .iter()
        .find(|module| module.contains(path))
        .cloned()
        .unwrap_or(Module::Undefined)
}

/// Path segments, skipping `.` and root/prefix components.
///
/// `..` is kept as a segment, so a module reaching outside the root never
/// prefixes a root-relative file.
fn segments(path: &Utf8Path) -> impl Iterator<Item = &str> {
    path.components().filter_map(|c| match c {
        Utf8Component::Normal(seg) => Some(seg),
        Utf8Component::ParentDir => Some(".."),
        Utf8Component::CurDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules() -> Vec<Module> {
        vec![
            Module::package("pl.tfij.orders"),
            Module::package("pl.tfij.users"),
            Module::directory("scripts"),
        ]
    }

    #[test]
    fn package_name_maps_to_directory() {
        let module = Module::package("pl.tfij.orders");
        assert_eq!(module.name(), "pl.tfij.orders");
        assert_eq!(module.dir(), Some(Utf8Path::new("pl/tfij/orders")));
    }

    #[test]
    fn directory_module_keeps_path_as_name() {
        let module = Module::directory("src/main/java");
        assert_eq!(module.name(), "src/main/java");
        assert_eq!(module.dir(), Some(Utf8Path::new("src/main/java")));
    }

    #[test]
    fn undefined_has_no_directory() {
        assert!(Module::Undefined.dir().is_none());
        assert_eq!(Module::Undefined.name(), UNDEFINED_MODULE_NAME);
        assert!(Module::Undefined.is_undefined());
        assert!(!Module::Undefined.contains(Utf8Path::new("anything.txt")));
    }

    #[test]
    fn matches_file_under_module_directory() {
        let module = match_module(Utf8Path::new("pl/tfij/orders/Order.java"), &modules());
        assert_eq!(module, Module::package("pl.tfij.orders"));
    }

    #[test]
    fn matches_nested_file() {
        let module = match_module(Utf8Path::new("scripts/ci/deploy.sh"), &modules());
        assert_eq!(module.name(), "scripts");
    }

    #[test]
    fn sibling_with_shared_prefix_is_not_matched() {
        let module = match_module(Utf8Path::new("pl/tfij/orders-extra/Legacy.java"), &modules());
        assert_eq!(module, Module::Undefined);

        let module = match_module(Utf8Path::new("pl/tfij/orders2/Legacy.java"), &modules());
        assert_eq!(module, Module::Undefined);
    }

    #[test]
    fn parent_directory_is_not_matched() {
        let module = match_module(Utf8Path::new("pl/tfij/App.java"), &modules());
        assert_eq!(module, Module::Undefined);
    }

    #[test]
    fn first_declared_module_wins_on_overlap() {
        let declared = vec![
            Module::directory("pl/tfij"),
            Module::package("pl.tfij.orders"),
        ];
        let module = match_module(Utf8Path::new("pl/tfij/orders/Order.java"), &declared);
        assert_eq!(module.name(), "pl/tfij");

        let reversed: Vec<Module> = declared.into_iter().rev().collect();
        let module = match_module(Utf8Path::new("pl/tfij/orders/Order.java"), &reversed);
        assert_eq!(module.name(), "pl.tfij.orders");
    }

    #[test]
    fn curdir_and_trailing_separator_are_ignored() {
        let declared = vec![Module::directory("./scripts/")];
        let module = match_module(Utf8Path::new("scripts/run.sh"), &declared);
        assert_eq!(module.name(), "./scripts/");
    }

    #[test]
    fn module_outside_root_matches_nothing() {
        let declared = vec![Module::directory("../orders")];
        let module = match_module(Utf8Path::new("orders/Order.java"), &declared);
        assert_eq!(module, Module::Undefined);
    }

    #[test]
    fn no_modules_means_undefined() {
        let module = match_module(Utf8Path::new("Main.java"), &[]);
        assert_eq!(module, Module::Undefined);
    }

    #[test]
    fn equality_uses_name_and_directory() {
        assert_eq!(Module::package("a.b"), Module::package("a.b"));
        assert_ne!(Module::package("a.b"), Module::directory("a/b"));
    }
}
