//! The window's content layer: a headless model of the map view.
//!
//! The GUI shell hands actual drawing to Mapbox GL; everything it needs to
//! do so (overlay layer specs, the camera extent, hover/selection filters,
//! drawer markup) is computed here from content notifications.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::details;
use crate::error::AppError;
use crate::geojson::{self, Extent, FEATURE_KEY};
use crate::i18n::Translations;
use crate::state::AppContext;
use crate::theme::Theme;
use crate::window::ContentEvent;

// ── Layer specs ──────────────────────────────────────────────────

/// One overlay layer, in the order the renderer stacks them.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSpec {
    /// Holds the GeoJSON source for the layers below it.
    Symbol { id: String },
    Line {
        id: String,
        source: String,
        color: &'static str,
        width: f64,
        opacity: f64,
    },
    Fill {
        id: String,
        source: String,
        color: &'static str,
        opacity: f64,
        /// Feature id this layer shows. `None` matches nothing: the layer
        /// is present but invisible until a filter is set.
        filter: Option<Option<u64>>,
    },
}

impl LayerSpec {
    pub fn id(&self) -> &str {
        match self {
            LayerSpec::Symbol { id }
            | LayerSpec::Line { id, .. }
            | LayerSpec::Fill { id, .. } => id,
        }
    }
}

// ── Document ─────────────────────────────────────────────────────

/// Where the current document came from; file-backed documents can be
/// re-read when the theme changes.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    File(PathBuf),
    Raw(String),
}

/// A parsed, normalized, id-tagged GeoJSON document.
pub struct Document {
    pub data: Value,
    pub bounds: Option<Extent>,
    pub source: DocumentSource,
}

// ── Map view ─────────────────────────────────────────────────────

pub struct MapView {
    ctx: Arc<AppContext>,
    i18n: Translations,
    theme: Theme,
    document: Option<Document>,
    layers: Vec<LayerSpec>,
    hovered: Option<u64>,
    selected: Option<u64>,
    /// Bumped per render so layer ids never collide across documents.
    generation: u64,
}

impl MapView {
    /// Build a view over the shared context, styled with the persisted theme.
    pub fn new(ctx: Arc<AppContext>) -> MapView {
        let theme = ctx.with_settings(|s| s.theme);
        MapView {
            ctx,
            i18n: Translations::from_env(),
            theme,
            document: None,
            layers: Vec::new(),
            hovered: None,
            selected: None,
            generation: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn hovered(&self) -> Option<u64> {
        self.hovered
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    /// Camera target for the current document. `None` when there is nothing
    /// to fit or the extent is a single point.
    pub fn fit_bounds(&self) -> Option<Extent> {
        let bounds = self.document.as_ref()?.bounds?;
        let [w, s, e, n] = bounds;
        if (w - e).abs() < f64::EPSILON && (s - n).abs() < f64::EPSILON {
            return None;
        }
        Some(bounds)
    }

    /// Drawer heading, localized.
    pub fn drawer_title(&self) -> String {
        self.i18n.get("page.drawer_header_title")
    }

    /// Apply one content notification.
    pub fn apply(&mut self, event: ContentEvent) -> Result<(), AppError> {
        match event {
            ContentEvent::SetTheme(theme) => self.set_theme(theme),
            ContentEvent::LoadFile(path) => self.load_file(path),
            ContentEvent::LoadData(text) => self.render(text, None),
        }
    }

    /// Restore the persisted session: apply the saved theme's styling and
    /// re-open the last file if one is recorded.
    pub fn restore_session(&mut self) -> Result<(), AppError> {
        let last_file = self.ctx.with_settings(|s| s.last_file.clone());
        if let Some(path) = last_file {
            self.load_file(path)?;
        }
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), AppError> {
        self.theme = theme;
        self.ctx.with_settings_mut(|s| s.theme = theme);
        if let Err(e) = self.ctx.save_settings() {
            eprintln!("[GeoJSON] Failed to persist theme: {e}");
        }

        // Swapping the base style drops the overlay layers with it; re-render
        // the current document, re-reading file-backed documents from disk.
        match self.document.take().map(|d| d.source) {
            Some(DocumentSource::File(path)) => self.load_file(path),
            Some(DocumentSource::Raw(text)) => self.render(text, None),
            None => {
                self.layers.clear();
                Ok(())
            }
        }
    }

    fn load_file(&mut self, path: PathBuf) -> Result<(), AppError> {
        let text = std::fs::read_to_string(&path)?;
        self.render(text, Some(path.clone()))?;
        self.ctx.with_settings_mut(|s| s.last_file = Some(path));
        if let Err(e) = self.ctx.save_settings() {
            eprintln!("[GeoJSON] Failed to persist last file: {e}");
        }
        Ok(())
    }

    fn render(&mut self, text: String, file: Option<PathBuf>) -> Result<(), AppError> {
        let mut parsed: Value = serde_json::from_str(&text).map_err(|_| AppError::Document {
            message: self.i18n.get("errors.not_geojson_file"),
        })?;

        geojson::tag_feature_ids(&mut parsed);
        let data = geojson::normalize(parsed).map_err(|_| AppError::Document {
            message: self.i18n.get("errors.not_geojson_file"),
        })?;
        let bounds = geojson::extent(&data);

        // Raw sources keep their text so a theme change can re-render.
        let source = match file {
            Some(path) => DocumentSource::File(path),
            None => DocumentSource::Raw(text),
        };

        self.generation += 1;
        self.layers = build_layers(self.theme, self.generation);
        self.hovered = None;
        self.selected = None;
        self.document = Some(Document {
            data,
            bounds,
            source,
        });
        Ok(())
    }

    /// Update the hover highlight to the feature under the cursor.
    pub fn hover(&mut self, feature: Option<u64>) {
        self.hovered = feature;
        set_fill_filter(&mut self.layers, LAYER_FILLS_HOVER, feature);
    }

    /// Select a feature (a map click). Returns the drawer markup for its
    /// properties, or `None` when the selection was cleared.
    pub fn select(&mut self, feature: Option<u64>) -> Option<String> {
        self.selected = feature;
        set_fill_filter(&mut self.layers, LAYER_FILLS_ACTIVE, feature);

        let id = feature?;
        let properties = self.feature_properties(id)?;
        Some(details::build_details(properties))
    }

    fn feature_properties(&self, id: u64) -> Option<&serde_json::Map<String, Value>> {
        let features = self.document.as_ref()?.data.get("features")?.as_array()?;
        features
            .iter()
            .filter_map(|f| f.get("properties").and_then(Value::as_object))
            .find(|props| props.get(FEATURE_KEY).and_then(Value::as_u64) == Some(id))
    }
}

// ── Layer construction ───────────────────────────────────────────

const LAYER_SHAPES: &str = "shapes";
const LAYER_LINES: &str = "lines";
const LAYER_FILLS: &str = "fills";
const LAYER_FILLS_HOVER: &str = "fills-hover";
const LAYER_FILLS_ACTIVE: &str = "fills-active";

fn build_layers(theme: Theme, generation: u64) -> Vec<LayerSpec> {
    let paint = theme.paint();
    let shapes_id = format!("{LAYER_SHAPES}-{generation}");

    vec![
        LayerSpec::Symbol {
            id: shapes_id.clone(),
        },
        LayerSpec::Line {
            id: format!("{LAYER_LINES}-{generation}"),
            source: shapes_id.clone(),
            color: paint.line_color,
            width: 1.0,
            opacity: paint.line_opacity,
        },
        LayerSpec::Fill {
            id: format!("{LAYER_FILLS}-{generation}"),
            source: shapes_id.clone(),
            color: paint.fill_color,
            opacity: paint.fill_opacity,
            filter: None,
        },
        LayerSpec::Fill {
            id: format!("{LAYER_FILLS_HOVER}-{generation}"),
            source: shapes_id.clone(),
            color: paint.fill_color,
            opacity: paint.fill_opacity_active,
            filter: Some(None),
        },
        LayerSpec::Fill {
            id: format!("{LAYER_FILLS_ACTIVE}-{generation}"),
            source: shapes_id,
            color: paint.fill_color,
            opacity: paint.fill_opacity_active,
            filter: Some(None),
        },
    ]
}

fn set_fill_filter(layers: &mut [LayerSpec], prefix: &str, feature: Option<u64>) {
    for layer in layers {
        if let LayerSpec::Fill {
            id,
            filter: Some(filter),
            ..
        } = layer
        {
            if id.starts_with(prefix) {
                *filter = feature;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;

    fn temp_ctx(name: &str) -> Arc<AppContext> {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Arc::new(AppContext::new(dir, AppSettings::default()))
    }

    fn two_county_collection() -> String {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "name": "Travis" },
                    "geometry": { "type": "Point", "coordinates": [-97.7, 30.3] },
                },
                {
                    "type": "Feature",
                    "properties": { "name": "Harris" },
                    "geometry": { "type": "Point", "coordinates": [-95.4, 29.8] },
                },
            ],
        })
        .to_string()
    }

    #[test]
    fn test_load_data_builds_five_layers() {
        let mut view = MapView::new(temp_ctx("geojson_test_map_layers"));
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();

        let layers = view.layers();
        assert_eq!(layers.len(), 5);
        assert!(matches!(layers[0], LayerSpec::Symbol { .. }));
        assert!(matches!(layers[1], LayerSpec::Line { .. }));
        // Resting fill shows everything; hover/active start hidden.
        assert!(matches!(layers[2], LayerSpec::Fill { filter: None, .. }));
        assert!(matches!(layers[3], LayerSpec::Fill { filter: Some(None), .. }));
        assert!(matches!(layers[4], LayerSpec::Fill { filter: Some(None), .. }));
    }

    #[test]
    fn test_layer_paint_follows_theme() {
        let ctx = temp_ctx("geojson_test_map_paint");
        ctx.with_settings_mut(|s| s.theme = Theme::Satellite);
        let mut view = MapView::new(ctx);
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();

        let LayerSpec::Line { color, .. } = &view.layers()[1] else {
            unreachable!("layer 1 is the line layer");
        };
        assert_eq!(*color, Theme::Satellite.paint().line_color);
    }

    #[test]
    fn test_theme_change_persists_and_rerenders() {
        let ctx = temp_ctx("geojson_test_map_theme_change");
        let mut view = MapView::new(ctx.clone());
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();
        let old_ids: Vec<String> =
            view.layers().iter().map(|l| l.id().to_string()).collect();

        view.apply(ContentEvent::SetTheme(Theme::Light)).unwrap();

        assert_eq!(ctx.with_settings(|s| s.theme), Theme::Light);
        let reloaded = crate::settings::load_settings(&ctx.config_dir).unwrap();
        assert_eq!(reloaded.theme, Theme::Light);

        // Document survives the restyle under fresh layer ids.
        assert!(view.document().is_some());
        assert_eq!(view.layers().len(), 5);
        for layer in view.layers() {
            assert!(!old_ids.contains(&layer.id().to_string()));
        }
    }

    #[test]
    fn test_load_file_persists_last_file_and_reloads_on_theme_change() {
        let ctx = temp_ctx("geojson_test_map_file");
        let path = ctx.config_dir.join("doc.geojson");
        std::fs::write(&path, two_county_collection()).unwrap();

        let mut view = MapView::new(ctx.clone());
        view.apply(ContentEvent::LoadFile(path.clone())).unwrap();
        assert_eq!(ctx.with_settings(|s| s.last_file.clone()), Some(path.clone()));

        // Rewrite the file; a theme change must pick up the new contents.
        std::fs::write(
            &path,
            serde_json::json!({
                "type": "Feature",
                "properties": { "name": "Bexar" },
                "geometry": { "type": "Point", "coordinates": [-98.5, 29.4] },
            })
            .to_string(),
        )
        .unwrap();
        view.apply(ContentEvent::SetTheme(Theme::Outdoors)).unwrap();

        let doc = view.document().unwrap();
        assert_eq!(doc.data["features"].as_array().unwrap().len(), 1);
        assert_eq!(doc.data["features"][0]["properties"]["name"], "Bexar");
    }

    #[test]
    fn test_fit_bounds_skips_degenerate_extent() {
        let mut view = MapView::new(temp_ctx("geojson_test_map_bounds"));
        view.apply(ContentEvent::LoadData(
            serde_json::json!({ "type": "Point", "coordinates": [1.0, 2.0] }).to_string(),
        ))
        .unwrap();
        assert_eq!(view.fit_bounds(), None);

        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();
        assert_eq!(view.fit_bounds(), Some([-97.7, 29.8, -95.4, 30.3]));
    }

    #[test]
    fn test_select_returns_drawer_markup_and_sets_filter() {
        let mut view = MapView::new(temp_ctx("geojson_test_map_select"));
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();

        let html = view.select(Some(1)).unwrap();
        assert_eq!(view.selected(), Some(1));
        assert_eq!(view.drawer_title(), "Details");
        assert!(html.contains("<dd>Harris</dd>"));
        assert!(!html.contains(FEATURE_KEY));

        let LayerSpec::Fill { filter, .. } = &view.layers()[4] else {
            unreachable!("layer 4 is the active fill");
        };
        assert_eq!(*filter, Some(Some(1)));

        assert_eq!(view.select(None), None);
    }

    #[test]
    fn test_hover_updates_only_hover_layer() {
        let mut view = MapView::new(temp_ctx("geojson_test_map_hover"));
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();
        view.hover(Some(0));
        assert_eq!(view.hovered(), Some(0));

        let LayerSpec::Fill { filter: hover, .. } = &view.layers()[3] else {
            unreachable!("layer 3 is the hover fill");
        };
        let LayerSpec::Fill { filter: active, .. } = &view.layers()[4] else {
            unreachable!("layer 4 is the active fill");
        };
        assert_eq!(*hover, Some(Some(0)));
        assert_eq!(*active, Some(None));
    }

    #[test]
    fn test_invalid_data_keeps_previous_document() {
        let mut view = MapView::new(temp_ctx("geojson_test_map_invalid"));
        view.apply(ContentEvent::LoadData(two_county_collection()))
            .unwrap();

        let err = view
            .apply(ContentEvent::LoadData("not json at all".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::Document { .. }));
        assert!(view.document().is_some());
    }

    #[test]
    fn test_restore_session_reopens_last_file() {
        let ctx = temp_ctx("geojson_test_map_restore");
        let path = ctx.config_dir.join("doc.geojson");
        std::fs::write(&path, two_county_collection()).unwrap();
        ctx.with_settings_mut(|s| s.last_file = Some(path));

        let mut view = MapView::new(ctx);
        view.restore_session().unwrap();
        assert!(view.document().is_some());
        assert_eq!(view.layers().len(), 5);
    }
}
