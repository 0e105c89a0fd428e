//! Image variant selection.
//!
//! A catalog entity carries several renditions of the same artwork. Providers
//! usually list them largest first, but nothing here relies on that order:
//! "largest" is computed from widths, and a size class addresses a fixed slot.

use serde::{Deserialize, Deserializer, Serialize};

/// One resolution-specific rendition of an artwork image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    pub url: String,
    /// Some providers send `null` dimensions; those read as 0 (valid but minimal).
    #[serde(default, deserialize_with = "null_as_zero")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub height: u32,
}

impl ImageVariant {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }

    /// `"640 x 640"` style label for download options.
    pub fn dimensions_label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Conventional size class of a variant slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Large, SizeClass::Medium, SizeClass::Small];

    /// Positional index in the provider's variant list.
    pub fn slot(self) -> usize {
        match self {
            SizeClass::Large => 0,
            SizeClass::Medium => 1,
            SizeClass::Small => 2,
        }
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Lowercase label used as a file-name qualifier.
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Large => "large",
            SizeClass::Medium => "medium",
            SizeClass::Small => "small",
        }
    }

    /// Capitalised label for display.
    pub fn title(self) -> &'static str {
        match self {
            SizeClass::Large => "Large",
            SizeClass::Medium => "Medium",
            SizeClass::Small => "Small",
        }
    }
}

/// Which variant the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantRequest {
    /// The variant with the greatest width.
    Largest,
    /// The variant at the size class's slot, with no fallback.
    Slot(SizeClass),
}

/// Picks one variant URL from `variants`.
///
/// - `Largest`: maximum `width`; ties keep the first encountered; `None` when empty.
/// - `Slot(class)`: the entry at `class.slot()`, or `None` if the list is shorter.
///   Callers treat `None` as "unavailable" rather than substituting another slot.
pub fn select_variant(variants: &[ImageVariant], request: VariantRequest) -> Option<&str> {
    let chosen = match request {
        VariantRequest::Largest => variants.iter().fold(None, |best: Option<&ImageVariant>, v| {
            match best {
                Some(b) if b.width >= v.width => Some(b),
                _ => Some(v),
            }
        }),
        VariantRequest::Slot(class) => variants.get(class.slot()),
    };
    chosen.map(|v| v.url.as_str())
}
