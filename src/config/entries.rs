//! Application entry groups

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the files of an entry group are loaded in the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryFormat {
    /// Classic `<script>`
    #[serde(alias = "classic-script")]
    Script,
    /// Native ES module
    #[serde(alias = "native-module")]
    Module,
    /// ES module loaded through es-module-shims
    ModuleShim,
    /// SystemJS module
    #[serde(alias = "system-module", alias = "systemjs")]
    System,
}

impl EntryFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Module => "module",
            Self::ModuleShim => "module-shim",
            Self::System => "system",
        }
    }
}

impl fmt::Display for EntryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of application files sharing one module format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntries {
    #[serde(rename = "type")]
    pub format: EntryFormat,

    #[serde(default)]
    pub files: Vec<String>,
}

impl AppEntries {
    pub fn new<I, S>(format: EntryFormat, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            format,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
