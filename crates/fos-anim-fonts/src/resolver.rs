//! Typeface resolution
//!
//! Every declared font is resolved through up to three tiers:
//! 1) externally loaded font data (provided by the embedder)
//! 2) system font matching family and style, then the system default
//! 3) custom glyph outlines embedded in the document
//!
//! [`Config::prefer_embedded_fonts`] moves tier 3 to the front.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::font::{parse_font_style, FontInfo, FontManager, FontRegistry, LazyFontManager};
use crate::glyph::{GlyphCollector, GlyphStats};
use crate::logger::{LogLevel, Logger, TracingLogger};
use crate::resource::{NullResourceProvider, ResourceProvider};
use crate::shape::{PathAttacher, ShapePathAttacher};

/// Overall outcome of a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// The document declares no fonts
    NoFonts,
    /// Every declared font has a typeface
    Complete,
    /// Some fonts have no typeface; text using them cannot render
    Partial,
}

/// Summary of [`FontResolver::parse_fonts`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    pub status: ResolutionStatus,
    /// Names of fonts with a typeface
    pub resolved: Vec<String>,
    /// Names of fonts left without one
    pub unresolved: Vec<String>,
    /// Embedded glyph counters, if the embedded tier ran
    pub glyphs: Option<GlyphStats>,
}

impl ResolutionReport {
    pub fn is_complete(&self) -> bool {
        self.status != ResolutionStatus::Partial
    }
}

/// Resolves the fonts of one animation document
pub struct FontResolver {
    config: Config,
    registry: FontRegistry,
    resource_provider: Arc<dyn ResourceProvider>,
    font_manager: LazyFontManager,
    logger: Arc<dyn Logger>,
    path_attacher: Arc<dyn PathAttacher>,
}

impl FontResolver {
    /// Create a resolver with the default collaborators: no external font
    /// data, lazily loaded system fonts, `tracing` diagnostics.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: FontRegistry::new(),
            resource_provider: Arc::new(NullResourceProvider),
            font_manager: LazyFontManager::default(),
            logger: Arc::new(TracingLogger),
            path_attacher: Arc::new(ShapePathAttacher),
        }
    }

    /// Set the source of embedder font data
    pub fn resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resource_provider = provider;
        self
    }

    /// Use an existing font manager
    pub fn font_manager(mut self, manager: Arc<dyn FontManager>) -> Self {
        self.font_manager = LazyFontManager::ready(manager);
        self
    }

    /// Create the font manager on first use
    pub fn lazy_font_manager(mut self, manager: LazyFontManager) -> Self {
        self.font_manager = manager;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn path_attacher(mut self, attacher: Arc<dyn PathAttacher>) -> Self {
        self.path_attacher = attacher;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Whether the font manager has been created
    pub fn font_manager_initialized(&self) -> bool {
        self.font_manager.is_initialized()
    }

    /// Look up a declared font by name
    pub fn find_font(&self, name: &str) -> Option<&FontInfo> {
        self.registry.get(name)
    }

    /// Resolve the `fonts` and `chars` nodes of a whole document
    pub fn parse_document(&mut self, document: &Value) -> ResolutionReport {
        self.parse_fonts(document.get("fonts"), document.get("chars"))
    }

    /// Populate the registry from `fonts` and resolve every entry.
    ///
    /// `chars` is the optional embedded glyph list. Failures never abort the
    /// pass; fonts that cannot be resolved are listed in the report.
    pub fn parse_fonts(&mut self, fonts: Option<&Value>, chars: Option<&Value>) -> ResolutionReport {
        let declared = self.registry.populate(fonts, self.logger.as_ref());
        tracing::debug!("Declared {} fonts", declared);

        let chars = chars.and_then(Value::as_array).map(Vec::as_slice);
        let mut glyphs = None;

        'resolve: {
            if self.registry.is_empty() {
                break 'resolve;
            }

            if let Some(chars) = chars.filter(|_| self.config.prefer_embedded_fonts) {
                let (resolved, stats) = self.run_embedded(chars);
                glyphs = Some(stats);
                if resolved {
                    break 'resolve;
                }
            }

            if self.resolve_native_typefaces() {
                break 'resolve;
            }

            if let Some(chars) = chars.filter(|_| !self.config.prefer_embedded_fonts) {
                let (_, stats) = self.run_embedded(chars);
                glyphs = Some(stats);
            }
        }

        self.report(glyphs)
    }

    /// Resolve unresolved fonts from embedder data or system fonts.
    ///
    /// Returns `true` when every font has a typeface afterwards.
    pub fn resolve_native_typefaces(&mut self) -> bool {
        let mut has_unresolved = false;

        for (name, info) in self.registry.iter_mut() {
            if info.is_resolved() {
                continue;
            }
            resolve_native(
                name,
                info,
                self.resource_provider.as_ref(),
                self.font_manager.get(),
                self.logger.as_ref(),
            );
            has_unresolved |= !info.is_resolved();
        }

        !has_unresolved
    }

    /// Resolve unresolved fonts from the embedded glyph list.
    ///
    /// Returns `true` when every font has a typeface afterwards.
    pub fn resolve_embedded_typefaces(&mut self, chars: &[Value]) -> bool {
        self.run_embedded(chars).0
    }

    fn run_embedded(&mut self, chars: &[Value]) -> (bool, GlyphStats) {
        let mut collector = GlyphCollector::new(self.logger.as_ref(), self.path_attacher.as_ref());
        let resolved = collector.resolve(&mut self.registry, chars);
        let stats = collector.stats();
        tracing::debug!("Embedded glyphs: {} accepted, {} skipped", stats.accepted, stats.skipped);
        (resolved, stats)
    }

    fn report(&self, glyphs: Option<GlyphStats>) -> ResolutionReport {
        let (resolved, unresolved): (Vec<_>, Vec<_>) =
            self.registry.iter().partition(|(_, info)| info.is_resolved());
        let resolved: Vec<String> = resolved.into_iter().map(|(name, _)| name.to_string()).collect();
        let unresolved: Vec<String> = unresolved.into_iter().map(|(name, _)| name.to_string()).collect();

        let status = if self.registry.is_empty() {
            ResolutionStatus::NoFonts
        } else if unresolved.is_empty() {
            ResolutionStatus::Complete
        } else {
            self.logger.log(
                LogLevel::Warning,
                None,
                &format!("Unresolved fonts: {}.", unresolved.join(", ")),
            );
            ResolutionStatus::Partial
        };

        ResolutionReport { status, resolved, unresolved, glyphs }
    }
}

impl fmt::Debug for FontResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResolver")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("font_manager", &self.font_manager)
            .finish()
    }
}

/// Native fallback chain for one font: embedder data, family/style match,
/// default face.
fn resolve_native(
    name: &str,
    info: &mut FontInfo,
    provider: &dyn ResourceProvider,
    manager: &dyn FontManager,
    logger: &dyn Logger,
) {
    let typeface = provider
        .load_font_bytes(name, &info.path)
        .and_then(|data| manager.make_from_data(data));

    let typeface = match typeface {
        Some(typeface) => Some(typeface),
        None => {
            let style = parse_font_style(&info.style, logger).style;
            manager.match_family_style(&info.family, style).or_else(|| {
                logger.log(
                    LogLevel::Error,
                    None,
                    &format!("Could not create typeface for {}|{}.", info.family, info.style),
                );
                manager.legacy_default(style)
            })
        }
    };

    if let Some(typeface) = typeface {
        info.set_typeface(typeface);
    }
}
