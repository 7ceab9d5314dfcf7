//! Common test utilities for polyfills-loader integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A minimal app page with one module entry
#[allow(dead_code)]
pub const INDEX_HTML: &str = r#"<html>
<head>
  <title>My app</title>
</head>
<body>
  <my-app></my-app>
  <script type="module" src="./app.js"></script>
</body>
</html>
"#;

/// Installed location of the fetch polyfill
#[allow(dead_code)]
pub const FETCH_POLYFILL: &str = "node_modules/whatwg-fetch/dist/fetch.umd.js";

/// A project directory for integration tests
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with an index.html
    #[allow(dead_code)]
    pub fn with_index() -> Self {
        let project = Self::new();
        project.write_file("index.html", INDEX_HTML);
        project
    }

    /// Install the fetch polyfill into node_modules
    #[allow(dead_code)]
    pub fn install_fetch(&self) -> String {
        let code = "(function () {\n  self.fetch = function () {};\n})();\n";
        self.write_file(FETCH_POLYFILL, code);
        code.to_string()
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// List the files of a project directory, sorted
    #[allow(dead_code)]
    pub fn list_dir(&self, path: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path.join(path))
            .expect("Failed to read directory")
            .map(|entry| {
                entry
                    .expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("test/file.txt", "hello");
        assert!(project.file_exists("test/file.txt"));
        assert_eq!(project.read_file("test/file.txt"), "hello");
        assert_eq!(project.list_dir("test"), ["file.txt"]);
    }
}
