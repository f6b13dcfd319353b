use crate::engine::assets::catalog::Catalog;
use crate::engine::assets::texture_registry::TextureDescriptor;
use bevy::prelude::*;
use constants::render_settings::MOBILE_BREAKPOINT_PX;
use constants::texture::DEFAULT_TEXTURE_ID;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportClass {
    pub fn from_width(logical_width: f32) -> Self {
        if logical_width <= MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// What a session transition changed. An empty change means the call was a
/// no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionChange {
    pub model: bool,
    pub texture: bool,
    pub panel: bool,
    pub viewport: bool,
}

impl SessionChange {
    pub fn is_empty(&self) -> bool {
        !(self.model || self.texture || self.panel || self.viewport)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            model: self.model || other.model,
            texture: self.texture || other.texture,
            panel: self.panel || other.panel,
            viewport: self.viewport || other.viewport,
        }
    }
}

/// The viewer's current selection. Only changed through the transitions below.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSession {
    active_model_id: String,
    active_texture_id: String,
    panel_open: bool,
    viewport_class: ViewportClass,
    /// Bumped on every model change; in-flight loads from older generations
    /// are discarded.
    generation: u64,
}

impl ViewerSession {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            active_model_id: catalog.default_model_id().to_string(),
            active_texture_id: DEFAULT_TEXTURE_ID.to_string(),
            panel_open: true,
            viewport_class: ViewportClass::default(),
            generation: 1,
        }
    }

    pub fn active_model_id(&self) -> &str {
        &self.active_model_id
    }

    pub fn active_texture_id(&self) -> &str {
        &self.active_texture_id
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport_class
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select_model(&mut self, catalog: &Catalog, id: &str) -> SessionChange {
        if id == self.active_model_id {
            return SessionChange::default();
        }
        if !catalog.contains(id) {
            warn!("Ignoring selection of unknown model '{}'", id);
            return SessionChange::default();
        }
        self.active_model_id = id.to_string();
        self.generation += 1;
        info!("→ Model selected: {} (generation {})", id, self.generation);
        SessionChange {
            model: true,
            ..default()
        }
    }

    pub fn select_texture(&mut self, id: &str) -> SessionChange {
        if id == self.active_texture_id {
            return SessionChange::default();
        }
        let Some(descriptor) = TextureDescriptor::lookup(id) else {
            warn!("Ignoring selection of unknown texture '{}'", id);
            return SessionChange::default();
        };
        self.active_texture_id = descriptor.id.to_string();
        info!("→ Texture selected: {}", id);
        SessionChange {
            texture: true,
            ..default()
        }
    }

    pub fn toggle_panel(&mut self) -> SessionChange {
        self.panel_open = !self.panel_open;
        SessionChange {
            panel: true,
            ..default()
        }
    }

    /// Switch layout class. Entering the mobile layout always opens the panel.
    pub fn set_viewport_class(&mut self, class: ViewportClass) -> SessionChange {
        if class == self.viewport_class {
            return SessionChange::default();
        }
        self.viewport_class = class;
        let panel = class == ViewportClass::Mobile && !self.panel_open;
        if panel {
            self.panel_open = true;
        }
        SessionChange {
            viewport: true,
            panel,
            ..default()
        }
    }

    /// Put back a model whose replacement failed to load. The generation still
    /// advances so loads for the failed selection stay stale.
    pub fn restore_model(&mut self, catalog: &Catalog, id: &str) -> SessionChange {
        let change = self.select_model(catalog, id);
        if !change.is_empty() {
            warn!("↺ Model selection restored to '{}'", id);
        }
        change
    }

    pub fn restore_texture(&mut self, id: &str) -> SessionChange {
        let change = self.select_texture(id);
        if !change.is_empty() {
            warn!("↺ Texture selection restored to '{}'", id);
        }
        change
    }
}
