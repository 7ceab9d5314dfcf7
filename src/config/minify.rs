//! Minification setting (`minify: false | true | { ... }`)

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Options for the HTML minifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlMinifyOptions {
    /// Collapse whitespace in text outside of `pre`, `textarea`, `script` and `style`
    pub collapse_whitespace: bool,
    /// Collapse to a single space instead of removing whitespace entirely
    pub conservative_collapse: bool,
    pub remove_comments: bool,
}

impl Default for HtmlMinifyOptions {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            conservative_collapse: true,
            remove_comments: true,
        }
    }
}

/// Whether to minify, and how to minify the final HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinifySetting {
    Disabled,
    Enabled(HtmlMinifyOptions),
}

impl MinifySetting {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    pub fn html_options(&self) -> Option<&HtmlMinifyOptions> {
        match self {
            Self::Disabled => None,
            Self::Enabled(options) => Some(options),
        }
    }
}

impl Default for MinifySetting {
    fn default() -> Self {
        Self::Enabled(HtmlMinifyOptions::default())
    }
}

impl Serialize for MinifySetting {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Enabled(options) => options.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MinifySetting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MinifySettingVisitor;

        impl<'de> Visitor<'de> for MinifySettingVisitor {
            type Value = MinifySetting;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or an html minifier configuration")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(if value {
                    MinifySetting::default()
                } else {
                    MinifySetting::Disabled
                })
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(MinifySetting::default())
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let options =
                    HtmlMinifyOptions::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(MinifySetting::Enabled(options))
            }
        }

        deserializer.deserialize_any(MinifySettingVisitor)
    }
}
