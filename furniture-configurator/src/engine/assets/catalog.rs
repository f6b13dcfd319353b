use bevy::prelude::*;
use constants::path::DEFAULT_MODEL_ID;
use constants::render_settings::{
    DEFAULT_FIT_MARGIN, DEFAULT_ORBIT_MAX_DISTANCE, DEFAULT_ORBIT_MIN_DISTANCE,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Where a catalog entry's 3D asset lives and how much of its structure is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetReference {
    /// Asset with named parts known a priori, each with a positioning offset.
    Authored {
        path: String,
        parts: Vec<AuthoredPart>,
    },
    /// Raw asset with no naming assumptions.
    Generic { path: String },
}

impl AssetReference {
    pub fn path(&self) -> &str {
        match self {
            Self::Authored { path, .. } | Self::Generic { path } => path,
        }
    }
}

/// Named node of an authored asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredPart {
    pub node: String,
    #[serde(default)]
    pub offset: [f32; 3],
}

/// Orbit distance limits applied while the entry is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_ORBIT_MIN_DISTANCE,
            max_distance: DEFAULT_ORBIT_MAX_DISTANCE,
        }
    }
}

/// Author-tuned per-model layout and material hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutHints {
    #[serde(default)]
    pub vertical_offset: f32,
    #[serde(default = "default_scale")]
    pub uniform_scale: f32,
    #[serde(default = "default_fit_margin")]
    pub camera_fit_margin: f32,
    /// Accent colour (hex) per texture id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_override_by_texture: Option<HashMap<String, String>>,
    #[serde(default = "default_true")]
    pub force_metal_black: bool,
    #[serde(default)]
    pub extra_black_keywords: Vec<String>,
    #[serde(default)]
    pub accent_keywords: Vec<String>,
    /// Tint every untextured non-wood material with the accent.
    #[serde(default)]
    pub accent_fallback: bool,
    /// Derive the accent from the active texture's average colour.
    #[serde(default)]
    pub accent_from_texture: bool,
    #[serde(default)]
    pub orbit: OrbitLimits,
}

fn default_scale() -> f32 {
    1.0
}

fn default_fit_margin() -> f32 {
    DEFAULT_FIT_MARGIN
}

fn default_true() -> bool {
    true
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            vertical_offset: 0.0,
            uniform_scale: default_scale(),
            camera_fit_margin: default_fit_margin(),
            accent_override_by_texture: None,
            force_metal_black: true,
            extra_black_keywords: Vec::new(),
            accent_keywords: Vec::new(),
            accent_fallback: false,
            accent_from_texture: false,
            orbit: OrbitLimits::default(),
        }
    }
}

impl LayoutHints {
    /// Whether any material of this entry can take the accent role.
    pub fn uses_accent(&self) -> bool {
        !self.accent_keywords.is_empty() || self.accent_fallback
    }
}

/// Files handed to a platform AR viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArAssets {
    #[serde(default)]
    pub glb: Option<String>,
    #[serde(default)]
    pub usdz: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    pub id: String,
    pub display_name: String,
    pub thumbnail_path: String,
    pub asset: AssetReference,
    #[serde(default)]
    pub layout: LayoutHints,
    #[serde(default)]
    pub ar: Option<ArAssets>,
}

impl ModelCatalogEntry {
    /// AR files for this entry. The GLB defaults to the viewer asset itself.
    pub fn ar_assets(&self) -> ArAssets {
        let mut ar = self.ar.clone().unwrap_or_default();
        if ar.glb.is_none() {
            ar.glb = Some(self.asset.path().to_string());
        }
        ar
    }
}

/// Catalog manifest as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub models: Vec<ModelCatalogEntry>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains no usable models")]
    Empty,
}

const BUILTIN_CATALOG_JSON: &str = include_str!("../../../assets/catalog.json");

/// Validated, ordered, read-only model catalog.
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    entries: Vec<ModelCatalogEntry>,
}

impl Catalog {
    /// Validate a manifest. Entries with a duplicate id or a non-positive
    /// scale are dropped with a warning; an empty result is an error.
    pub fn from_manifest(manifest: &CatalogManifest) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(manifest.models.len());

        for entry in &manifest.models {
            if !seen.insert(entry.id.as_str()) {
                warn!("Dropping duplicate catalog id '{}'", entry.id);
                continue;
            }
            if !(entry.layout.uniform_scale > 0.0 && entry.layout.uniform_scale.is_finite()) {
                warn!(
                    "Dropping catalog entry '{}': invalid scale {}",
                    entry.id, entry.layout.uniform_scale
                );
                continue;
            }
            entries.push(entry.clone());
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let manifest: CatalogManifest = serde_json::from_str(json)?;
        Self::from_manifest(&manifest)
    }

    /// The catalog compiled into the binary, used when the served one is
    /// unavailable.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn get(&self, id: &str) -> Option<&ModelCatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The model shown at startup: the configured default when the catalog
    /// has it, otherwise the first entry.
    pub fn default_model_id(&self) -> &str {
        self.get(DEFAULT_MODEL_ID)
            .or_else(|| self.entries.first())
            .map_or(DEFAULT_MODEL_ID, |entry| entry.id.as_str())
    }

    pub fn entries(&self) -> &[ModelCatalogEntry] {
        &self.entries
    }

    /// Entry `step` positions away from `id`, wrapping at both ends.
    pub fn neighbour(&self, id: &str, step: isize) -> Option<&ModelCatalogEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let len = self.entries.len() as isize;
        let target = (index as isize + step).rem_euclid(len);
        self.entries.get(target as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> ModelCatalogEntry {
        ModelCatalogEntry {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            thumbnail_path: format!("images/{id}.jpg"),
            asset: AssetReference::Generic {
                path: format!("models/{id}.glb"),
            },
            layout: LayoutHints::default(),
            ar: None,
        }
    }

    #[test]
    fn shipped_catalog_parses_with_unique_ids() {
        let catalog = Catalog::builtin().expect("catalog.json must parse");

        assert_eq!(catalog.default_model_id(), "bedside");
        assert_eq!(catalog.entries().len(), 11);

        let tv = catalog.get("tv-panel").unwrap();
        assert!(tv.layout.accent_fallback);
        assert_eq!(tv.layout.accent_keywords, vec!["color".to_string()]);
        let overrides = tv.layout.accent_override_by_texture.as_ref().unwrap();
        assert_eq!(overrides.get("texture_4").map(String::as_str), Some("#ff8a33"));

        let bench = catalog.get("luggage-bench").unwrap();
        assert_eq!(bench.layout.uniform_scale, 0.85);
        assert_eq!(bench.layout.orbit.max_distance, 14.0);
    }

    #[test]
    fn missing_layout_uses_defaults() {
        let catalog = Catalog::from_json_str(
            r#"{ "models": [ { "id": "x", "display_name": "X", "thumbnail_path": "x.jpg",
                 "asset": { "kind": "generic", "path": "x.glb" } } ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.default_model_id(), "x");
        let layout = &catalog.entries()[0].layout;
        assert_eq!(layout.uniform_scale, 1.0);
        assert_eq!(layout.camera_fit_margin, DEFAULT_FIT_MARGIN);
        assert!(layout.force_metal_black);
        assert!(!layout.uses_accent());
    }

    #[test]
    fn duplicate_ids_keep_the_first_entry() {
        let mut second = entry("desk");
        second.display_name = "Second".into();
        let manifest = CatalogManifest {
            models: vec![entry("desk"), second, entry("rack")],
        };

        let catalog = Catalog::from_manifest(&manifest).unwrap();
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.get("desk").unwrap().display_name, "DESK");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let mut broken = entry("broken");
        broken.layout.uniform_scale = 0.0;
        let manifest = CatalogManifest {
            models: vec![broken],
        };

        assert!(matches!(
            Catalog::from_manifest(&manifest),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_json_str("{ not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn neighbour_wraps_around() {
        let manifest = CatalogManifest {
            models: vec![entry("a"), entry("b"), entry("c")],
        };
        let catalog = Catalog::from_manifest(&manifest).unwrap();

        assert_eq!(catalog.neighbour("c", 1).unwrap().id, "a");
        assert_eq!(catalog.neighbour("a", -1).unwrap().id, "c");
        assert!(catalog.neighbour("missing", 1).is_none());
    }

    #[test]
    fn ar_glb_defaults_to_asset_path() {
        let plain = entry("desk");
        assert_eq!(plain.ar_assets().glb.as_deref(), Some("models/desk.glb"));

        let mut with_usdz = entry("desk");
        with_usdz.ar = Some(ArAssets {
            glb: None,
            usdz: Some("ar/desk.usdz".into()),
        });
        let ar = with_usdz.ar_assets();
        assert_eq!(ar.glb.as_deref(), Some("models/desk.glb"));
        assert_eq!(ar.usdz.as_deref(), Some("ar/desk.usdz"));
    }
}
