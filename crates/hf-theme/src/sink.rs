//! The boundary to a rendering surface.
//!
//! The engine never touches a live document. A host hands it anything that
//! can accept `name: value` style properties and [`apply_theme`] writes one
//! entry per variable.

use std::collections::BTreeMap;
use std::fmt;

use hf_color::Hsl;

use crate::mapping::ThemeVariables;

/// Something that accepts named style properties.
pub trait StyleSink {
    /// Write one property. A later write to the same name replaces it.
    fn set_variable(&mut self, name: &str, value: &str);
}

impl StyleSink for BTreeMap<String, String> {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.insert(name.to_owned(), value.to_owned());
    }
}

impl<S: StyleSink + ?Sized> StyleSink for &mut S {
    fn set_variable(&mut self, name: &str, value: &str) {
        (**self).set_variable(name, value);
    }
}

/// Write every variable to `sink` as an `"H S% L%"` string. Returns the
/// number of writes.
pub fn apply_theme<S: StyleSink + ?Sized>(variables: &ThemeVariables, sink: &mut S) -> usize {
    let mut written = 0;
    for (name, color) in variables.iter() {
        sink.set_variable(name, &Hsl::from(color).to_css_string());
        written += 1;
    }
    tracing::debug!(written, "theme applied");
    written
}

// ---------------------------------------------------------------------------
// CssRule
// ---------------------------------------------------------------------------

/// A single CSS rule block collecting custom properties.
///
/// ```text
/// :root {
///   --background: 220 15% 9%;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    selector: String,
    declarations: Vec<(String, String)>,
}

impl CssRule {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Declarations in first-write order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl StyleSink for CssRule {
    fn set_variable(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.declarations.iter_mut().find(|(n, _)| n == name) {
            value.clone_into(&mut slot.1);
        } else {
            self.declarations.push((name.to_owned(), value.to_owned()));
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for (name, value) in &self.declarations {
            writeln!(f, "  {name}: {value};")?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
