//! Descriptive, filesystem-safe artwork file names from untrusted metadata.

/// Returned when sanitisation leaves nothing usable.
pub const FALLBACK_FILE_NAME: &str = "artwork.jpg";

/// Extension appended when the caller does not pick one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Linux NAME_MAX; names are ASCII after sanitisation so bytes == chars.
const NAME_MAX: usize = 255;

/// Identity used only to name a downloaded artwork file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkOwner {
    /// First artist, or playlist owner.
    pub primary: String,
    pub title: String,
    /// Resolution label, album name, or entity kind.
    pub qualifier: Option<String>,
}

impl ArtworkOwner {
    pub fn new(primary: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            title: title.into(),
            qualifier: None,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// `"{primary} - {title} ({qualifier})"` before any sanitisation.
    fn template(&self) -> String {
        match self.qualifier.as_deref() {
            Some(q) => format!("{} - {} ({})", self.primary, self.title, q),
            None => format!("{} - {}", self.primary, self.title),
        }
    }

    /// File name with the default `.jpg` extension.
    pub fn file_name(&self) -> String {
        derive_file_name(self, None)
    }
}

/// Builds the download file name for `owner`.
///
/// The template is filled first, then sanitised as a whole (see
/// [`sanitize_file_stem`]), then `.{extension}` is appended (`jpg` when `None`).
/// An empty stem yields `artwork.<ext>`.
///
/// # Examples
///
/// - `("Pink Floyd", "The Wall", Some("large"))` → `"Pink Floyd - The Wall (large).jpg"`
/// - `("AC/DC", "Back In Black?!", None)` → `"ACDC - Back In Black.jpg"`
pub fn derive_file_name(owner: &ArtworkOwner, extension: Option<&str>) -> String {
    let ext = extension
        .map(|e| {
            e.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    let stem = sanitize_file_stem(&owner.template());
    let stem = truncate_stem(&stem, NAME_MAX.saturating_sub(ext.len() + 1));
    if stem.is_empty() {
        return format!("artwork.{}", ext);
    }
    format!("{}.{}", stem, ext)
}

/// Applies the three sanitisation passes in order:
///
/// 1. drop every char that is not an ASCII letter/digit, whitespace, `-`, `_`, `.`, `(` or `)`
/// 2. collapse whitespace runs to one space
/// 3. trim
///
/// Stripping runs before collapsing so that a removed char between two
/// spaces cannot leave a double space behind.
pub fn sanitize_file_stem(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|&c| {
            c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '.' | '(' | ')')
        })
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut prev_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }

    out.trim().to_string()
}

/// Sanitises a complete file name (extension included), e.g. one supplied by
/// a client. Idempotent, and the identity on output of [`derive_file_name`].
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = sanitize_file_stem(name);
    let cleaned = truncate_stem(&cleaned, NAME_MAX);
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

fn truncate_stem(stem: &str, max: usize) -> String {
    if stem.len() <= max {
        return stem.to_string();
    }
    let mut take = max;
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    stem[..take].trim_end().to_string()
}
