//! Layered section merging.
//!
//! A config file holds several flat sections; [`merge_sections`] folds them
//! into one [`ConfigMap`] where later sections win key by key.
//!
//! # Example
//!
//! ```
//! use argconfig_core::*;
//! use serde_json::json;
//!
//! let main = json!({"level": "main", "only_main": 1});
//! let global = json!({"level": "global"});
//!
//! let merged = merge_sections([main.as_object(), global.as_object()]);
//! assert_eq!(merged["level"], json!("global"));
//! assert_eq!(merged["only_main"], json!(1));
//! ```

use crate::types::ConfigMap;

/// Shallow-merges sections in order; absent sections are skipped.
///
/// Each present section overwrites keys set by earlier ones. Values are
/// copied as-is, nested objects included.
pub fn merge_sections<'a, I>(sections: I) -> ConfigMap
where
    I: IntoIterator<Item = Option<&'a ConfigMap>>,
{
    let mut merged = ConfigMap::new();
    for section in sections.into_iter().flatten() {
        overlay(&mut merged, section);
    }
    merged
}

/// Copies every entry of `section` into `base`, replacing existing keys.
pub fn overlay(base: &mut ConfigMap, section: &ConfigMap) {
    for (key, value) in section {
        base.insert(key.clone(), value.clone());
    }
}
