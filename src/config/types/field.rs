//! Dotted config field paths for diagnostics.

/// Dotted path of a `huodong.toml` field, as written in the file.
///
/// Section validators construct these at their call sites, so every
/// diagnostic names the exact field to fix:
///
/// ```ignore
/// diag.error(FieldPath::new("build.index"), "must end in .json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
