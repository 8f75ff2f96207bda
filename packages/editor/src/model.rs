//! # Layout Document
//!
//! The single in-memory document the builder edits:
//!
//! ```text
//! LayoutState
//!   ├─ components: id → Component   (insertion ordered)
//!   ├─ sections:   [Section]        (render order)
//!   │     └─ components: [id]       (render order within the row)
//!   ├─ theme:      "default"
//!   └─ globalSettings: { ... }
//! ```
//!
//! Serialized field names follow the persisted WordPress post meta, so a
//! saved layout round-trips through `serde_json` unchanged.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use mediakit_common::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::EditorError;

pub const DEFAULT_THEME: &str = "default";

/// Component data is free-form JSON owned by the component type
pub type ComponentData = Map<String, Value>;

/// Component map, keyed by component id
pub type ComponentMap = IndexMap<String, Component>;

/// A single content block instance (hero, biography, topics, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default)]
    pub data: ComponentData,

    #[serde(rename = "sectionId", default)]
    pub section_id: String,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        component_type: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            data: ComponentData::new(),
            section_id: section_id.into(),
        }
    }

    pub fn with_data(mut self, data: ComponentData) -> Self {
        self.data = data;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Layout of a section row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    #[default]
    FullWidth,
    TwoColumn,
    ThreeColumn,
    MainSidebar,
    SidebarMain,
    /// Layouts this build does not know about are kept verbatim
    Other(String),
}

impl SectionType {
    pub fn as_str(&self) -> &str {
        match self {
            SectionType::FullWidth => "full_width",
            SectionType::TwoColumn => "two_column",
            SectionType::ThreeColumn => "three_column",
            SectionType::MainSidebar => "main_sidebar",
            SectionType::SidebarMain => "sidebar_main",
            SectionType::Other(name) => name,
        }
    }

    /// Number of columns the layout renders
    pub fn columns(&self) -> usize {
        match self {
            SectionType::TwoColumn | SectionType::MainSidebar | SectionType::SidebarMain => 2,
            SectionType::ThreeColumn => 3,
            SectionType::FullWidth | SectionType::Other(_) => 1,
        }
    }
}

impl From<String> for SectionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "full_width" | "full-width" | "" => SectionType::FullWidth,
            "two_column" => SectionType::TwoColumn,
            "three_column" => SectionType::ThreeColumn,
            "main_sidebar" => SectionType::MainSidebar,
            "sidebar_main" => SectionType::SidebarMain,
            _ => SectionType::Other(s),
        }
    }
}

impl From<&str> for SectionType {
    fn from(s: &str) -> Self {
        SectionType::from(s.to_string())
    }
}

impl From<SectionType> for String {
    fn from(t: SectionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered container of components defining a layout row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: String,

    #[serde(rename = "type", default)]
    pub section_type: SectionType,

    #[serde(default)]
    pub components: Vec<String>,
}

impl Section {
    pub fn new(section_id: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            section_id: section_id.into(),
            section_type,
            components: Vec::new(),
        }
    }

    pub fn with_components<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.components.iter().any(|c| c == component_id)
    }
}

/// Whole builder document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    #[serde(default)]
    pub components: ComponentMap,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(rename = "globalSettings", default)]
    pub global_settings: Map<String, Value>,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            components: ComponentMap::new(),
            sections: Vec::new(),
            theme: default_theme(),
            global_settings: Map::new(),
        }
    }
}

/// What [`LayoutState::repair`] had to fix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    /// (section_id, component_id) pairs dropped because the component does not exist
    pub dangling: Vec<(String, String)>,
    /// Component ids removed from a section because an earlier section already held them
    pub duplicates: Vec<String>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.duplicates.is_empty()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.sections.is_empty()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn has_component(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.section_id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.section_id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.section_id == section_id)
    }

    /// (section index, position in section) of a component reference
    pub fn locate(&self, component_id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section
                .components
                .iter()
                .position(|c| c == component_id)
                .map(|ci| (si, ci))
        })
    }

    /// Components that exist in the map but no section references
    pub fn orphaned_components(&self) -> Vec<String> {
        let referenced: HashSet<&str> = self
            .sections
            .iter()
            .flat_map(|s| s.components.iter().map(String::as_str))
            .collect();

        self.components
            .keys()
            .filter(|id| !referenced.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Section references that point at missing components
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        self.sections
            .iter()
            .flat_map(|s| {
                s.components
                    .iter()
                    .filter(|c| !self.components.contains_key(c.as_str()))
                    .map(move |c| (s.section_id.clone(), c.clone()))
            })
            .collect()
    }

    /// Point every referenced component's `sectionId` at the section holding it
    pub fn sync_section_ids(&mut self) {
        for section in &self.sections {
            for id in &section.components {
                if let Some(component) = self.components.get_mut(id) {
                    if component.section_id != section.section_id {
                        component.section_id = section.section_id.clone();
                    }
                }
            }
        }
    }

    /// Drop dangling and duplicate references, then re-sync `sectionId`s
    pub fn repair(&mut self) -> RepairReport {
        let mut report = RepairReport::default();
        let mut seen: HashSet<String> = HashSet::new();

        for section in &mut self.sections {
            let section_id = section.section_id.clone();
            let components = &self.components;
            section.components.retain(|id| {
                if !components.contains_key(id) {
                    report.dangling.push((section_id.clone(), id.clone()));
                    return false;
                }
                if !seen.insert(id.clone()) {
                    report.duplicates.push(id.clone());
                    return false;
                }
                true
            });
        }

        self.sync_section_ids();

        if !report.is_clean() {
            warn!(
                dangling = report.dangling.len(),
                duplicates = report.duplicates.len(),
                "Repaired layout references"
            );
        }

        report
    }

    /// Layouts saved before sections existed get one full-width section holding everything
    pub fn normalize_loaded(&mut self, ids: &dyn IdGenerator) -> RepairReport {
        if self.sections.is_empty() && !self.components.is_empty() {
            let section_id = ids.section_id();
            debug!(section_id = %section_id, components = self.components.len(), "Wrapping section-less layout");
            self.sections.push(
                Section::new(section_id, SectionType::FullWidth)
                    .with_components(self.components.keys().cloned()),
            );
        }

        if self.theme.is_empty() {
            self.theme = default_theme();
        }

        self.repair()
    }

    /// Remove components no section references; returns the removed ids
    pub fn prune_orphans(&mut self) -> Vec<String> {
        let orphans = self.orphaned_components();
        for id in &orphans {
            self.components.shift_remove(id);
        }
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "Pruned orphaned components");
        }
        orphans
    }

    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: Value) -> Result<Self, EditorError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a layout file from disk
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Write the layout to disk as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
