//! Background illustrations: the fixed catalog, the optional user-supplied
//! "custom" entry, and the per-document overrides applied when painting.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved id of the user-supplied illustration
pub const CUSTOM_ID: &str = "custom";

/// Display name of the user-supplied illustration
pub const CUSTOM_DISPLAY_NAME: &str = "مخصص";

/// Where an illustration's pixels come from
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image, fetched by whoever paints it
    Url(String),
    /// Image bytes carried inside the design
    Embedded { mime: String, bytes: Vec<u8> },
}

// Embedded images can be megabytes; only show their size.
impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ImageSource::Embedded { mime, bytes } => f
                .debug_struct("Embedded")
                .field("mime", mime)
                .field("bytes_len", &bytes.len())
                .finish(),
        }
    }
}

impl ImageSource {
    pub fn embedded(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageSource::Embedded {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse a URL or a `data:<mime>;base64,<payload>` URI
    pub fn from_uri(uri: &str) -> Result<Self, String> {
        let Some(rest) = uri.strip_prefix("data:") else {
            if uri.trim().is_empty() {
                return Err("empty image source".to_owned());
            }
            return Ok(ImageSource::Url(uri.to_owned()));
        };
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| "data URI without payload".to_owned())?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| "only base64 data URIs are supported".to_owned())?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("invalid base64 payload: {e}"))?;
        Ok(ImageSource::embedded(mime, bytes))
    }

    pub fn to_uri(&self) -> String {
        match self {
            ImageSource::Url(url) => url.clone(),
            ImageSource::Embedded { mime, bytes } => {
                format!("data:{mime};base64,{}", STANDARD.encode(bytes))
            }
        }
    }

    pub fn embedded_bytes(&self) -> Option<&[u8]> {
        match self {
            ImageSource::Embedded { bytes, .. } => Some(bytes),
            ImageSource::Url(_) => None,
        }
    }
}

impl Serialize for ImageSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_uri())
    }
}

impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ImageSource::from_uri(&raw).map_err(serde::de::Error::custom)
    }
}

/// A selectable background artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustrationTheme {
    pub id: String,
    pub display_name: String,
    pub image_source: ImageSource,
}

impl IllustrationTheme {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, image_source: ImageSource) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image_source,
        }
    }

    /// The user-supplied illustration built from uploaded image data
    pub fn custom(image_source: ImageSource) -> Self {
        Self::new(CUSTOM_ID, CUSTOM_DISPLAY_NAME, image_source)
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_ID
    }
}

/// Compositing modes for the background layer. Names follow CSS
/// `mix-blend-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const ALL: [BlendMode; 16] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BlendMode::ALL.into_iter().find(|mode| mode.as_str() == name)
    }
}

impl Serialize for BlendMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlendMode {
    /// Unknown modes degrade to [`BlendMode::Normal`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BlendMode::from_name(&raw).unwrap_or_else(|| {
            log::warn!("Unsupported blend mode {raw:?}, using normal");
            BlendMode::Normal
        }))
    }
}

pub const DEFAULT_OPACITY: f32 = 1.0;

/// The selected illustration together with this document's overrides.
/// Overrides are never written back to the catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Illustration {
    pub theme: IllustrationTheme,
    pub opacity: f32,
    pub blend_mode: BlendMode,
}

impl Illustration {
    pub fn new(theme: IllustrationTheme) -> Self {
        Self {
            theme,
            opacity: DEFAULT_OPACITY,
            blend_mode: BlendMode::Normal,
        }
    }

    pub fn id(&self) -> &str {
        &self.theme.id
    }

    /// Clamp into [0, 1]; non-finite values are ignored
    pub fn set_opacity(&mut self, value: f32) {
        if value.is_finite() {
            self.opacity = value.clamp(0.0, 1.0);
        }
    }
}

const CANONICAL: [(&str, &str); 11] = [
    ("space", "فضاء"),
    ("animals", "حيوانات"),
    ("school", "مدرسة"),
    ("nature", "طبيعة"),
    ("art", "فن"),
    ("science", "علوم"),
    ("sports", "رياضة"),
    ("tech", "تكنولوجيا"),
    ("history", "تاريخ"),
    ("stitch", "ستيتش"),
    ("mickey", "ميكي ماوس"),
];

/// The built-in illustrations, in display order
pub fn canonical_themes() -> Vec<IllustrationTheme> {
    CANONICAL
        .iter()
        .map(|(id, name)| {
            let url = format!("https://picsum.photos/seed/{id}123/840/1188");
            IllustrationTheme::new(*id, *name, ImageSource::Url(url))
        })
        .collect()
}

/// The first canonical illustration, used as the fallback selection
pub fn default_theme() -> IllustrationTheme {
    let (id, name) = CANONICAL[0];
    IllustrationTheme::new(
        id,
        name,
        ImageSource::Url(format!("https://picsum.photos/seed/{id}123/840/1188")),
    )
}

pub fn find_canonical(id: &str) -> Option<IllustrationTheme> {
    canonical_themes().into_iter().find(|theme| theme.id == id)
}

/// Illustrations currently offered to the user: the canonical set, preceded
/// by the custom entry when one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct IllustrationCatalog {
    entries: Vec<IllustrationTheme>,
}

impl Default for IllustrationCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

impl IllustrationCatalog {
    pub fn canonical() -> Self {
        Self {
            entries: canonical_themes(),
        }
    }

    pub fn entries(&self) -> &[IllustrationTheme] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&IllustrationTheme> {
        self.entries.iter().find(|theme| theme.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn custom(&self) -> Option<&IllustrationTheme> {
        self.get(CUSTOM_ID)
    }

    pub fn has_custom(&self) -> bool {
        self.custom().is_some()
    }

    /// Insert the custom entry, replacing an existing one in place. A new
    /// custom entry goes to the front.
    pub fn upsert_custom(&mut self, theme: IllustrationTheme) {
        debug_assert!(theme.is_custom());
        if let Some(slot) = self.entries.iter_mut().find(|t| t.is_custom()) {
            *slot = theme;
        } else {
            self.entries.insert(0, theme);
        }
    }

    /// Remove the custom entry, returning it if there was one
    pub fn remove_custom(&mut self) -> Option<IllustrationTheme> {
        let index = self.entries.iter().position(IllustrationTheme::is_custom)?;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_round_trips() {
        let source = ImageSource::embedded("image/png", vec![0x89, b'P', b'N', b'G', 0, 255]);
        let uri = source.to_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(ImageSource::from_uri(&uri).unwrap(), source);
    }

    #[test]
    fn plain_urls_stay_urls() {
        let source = ImageSource::from_uri("https://example.com/a.png").unwrap();
        assert_eq!(source, ImageSource::Url("https://example.com/a.png".to_owned()));
        assert!(source.embedded_bytes().is_none());
    }

    #[test]
    fn malformed_data_uris_are_rejected() {
        assert!(ImageSource::from_uri("data:image/png;base64").is_err());
        assert!(ImageSource::from_uri("data:image/png,abc").is_err());
        assert!(ImageSource::from_uri("data:image/png;base64,@@@").is_err());
        assert!(ImageSource::from_uri("  ").is_err());
    }

    #[test]
    fn unknown_blend_mode_degrades_to_normal() {
        let mode: BlendMode = serde_json::from_str("\"plus-lighter\"").unwrap();
        assert_eq!(mode, BlendMode::Normal);
        let mode: BlendMode = serde_json::from_str("\"color-dodge\"").unwrap();
        assert_eq!(mode, BlendMode::ColorDodge);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut illustration = Illustration::new(default_theme());
        illustration.set_opacity(1.7);
        assert_eq!(illustration.opacity, 1.0);
        illustration.set_opacity(-0.2);
        assert_eq!(illustration.opacity, 0.0);
        illustration.set_opacity(f32::NAN);
        assert_eq!(illustration.opacity, 0.0);
    }

    #[test]
    fn custom_entry_is_unique_and_first() {
        let mut catalog = IllustrationCatalog::canonical();
        let canonical_len = catalog.entries().len();

        catalog.upsert_custom(IllustrationTheme::custom(ImageSource::Url("a".into())));
        catalog.upsert_custom(IllustrationTheme::custom(ImageSource::Url("b".into())));

        assert_eq!(catalog.entries().len(), canonical_len + 1);
        assert!(catalog.entries()[0].is_custom());
        assert_eq!(catalog.entries()[0].image_source, ImageSource::Url("b".into()));

        assert!(catalog.remove_custom().is_some());
        assert!(catalog.remove_custom().is_none());
        assert_eq!(catalog, IllustrationCatalog::canonical());
    }

    #[test]
    fn default_theme_is_first_canonical() {
        assert_eq!(default_theme(), canonical_themes()[0]);
    }
}
