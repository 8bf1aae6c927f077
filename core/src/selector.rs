//! Active generator selection

use crate::generator::GeneratorKind;

/// Holds the currently active [`GeneratorKind`].
///
/// Written by the host's UI (through the engine), read by every refill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorSelector {
    kind: GeneratorKind,
}

impl GeneratorSelector {
    pub fn new(kind: GeneratorKind) -> Self {
        Self { kind }
    }

    pub fn active(&self) -> GeneratorKind {
        self.kind
    }

    /// Switch to `kind`, returning the previous kind.
    pub fn select(&mut self, kind: GeneratorKind) -> GeneratorKind {
        std::mem::replace(&mut self.kind, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_defaults_to_brown() {
        assert_eq!(GeneratorSelector::default().active(), GeneratorKind::Brown);
    }

    #[test]
    fn test_select_returns_previous() {
        let mut selector = GeneratorSelector::new(GeneratorKind::White);
        assert_eq!(selector.select(GeneratorKind::None), GeneratorKind::White);
        assert_eq!(selector.active(), GeneratorKind::None);
    }
}
