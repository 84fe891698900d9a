//! Import directives of one source file

use serde::{Deserialize, Serialize};

/// `import {a as b} from "./X.sol";` after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDependency {
    /// Path as written in the directive
    pub path: String,
    /// Project-relative path for relative imports; verbatim otherwise
    pub resolved: String,
    pub unit_alias: Option<String>,
    /// Imported symbols with their local aliases
    pub symbols: Vec<(String, Option<String>)>,
}

impl ImportDependency {
    pub fn new(importing_file: &str, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            resolved: resolve_import(importing_file, &path),
            path,
            unit_alias: None,
            symbols: Vec::new(),
        }
    }

    pub fn with_unit_alias(mut self, alias: impl Into<String>) -> Self {
        self.unit_alias = Some(alias.into());
        self
    }

    pub fn with_symbol(mut self, name: impl Into<String>, alias: Option<String>) -> Self {
        self.symbols.push((name.into(), alias));
        self
    }

    pub fn is_relative(&self) -> bool {
        is_relative(&self.path)
    }
}

fn is_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// Resolve `path` against the directory of `importing_file`
///
/// Package imports (`@openzeppelin/...`, `forge-std/...`) stay verbatim.
pub fn resolve_import(importing_file: &str, path: &str) -> String {
    if !is_relative(path) {
        return path.to_string();
    }
    let directory = match importing_file.rfind('/') {
        Some(at) => &importing_file[..at],
        None => "",
    };
    if directory.is_empty() {
        normalize_path(path)
    } else {
        normalize_path(&format!("{}/{}", directory, path))
    }
}

/// Collapse `.` and `..` segments; leading `..` that cannot be collapsed stay
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}
