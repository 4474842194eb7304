//! Canonicalization options and the three named presets.
//!
//! This is the entire configuration surface of the crate: there is no
//! environment variable or config file, because the crate has no process
//! lifecycle of its own (it is canonicalize-in, text-out).

/// How `Null` is rendered: the Unicode symbol or the ASCII underscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullStyle {
    /// `∅` (U+2205). The default.
    Symbol,
    /// `_`. Used by the `llm` preset, since `∅` costs extra tokens in some
    /// tokenizers.
    Underscore,
}

impl Default for NullStyle {
    fn default() -> Self {
        NullStyle::Symbol
    }
}

/// Options controlling canonical emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonOpts {
    /// Enable the auto-tabular transform for homogeneous object lists.
    pub auto_tabular: bool,
    /// Minimum list length to attempt tabular.
    pub min_rows: usize,
    /// Maximum union-key cardinality to attempt tabular.
    pub max_cols: usize,
    /// If `false`, every element must share the exact union key set.
    pub allow_missing: bool,
    /// How `Null` is rendered.
    pub null_style: NullStyle,
}

impl Default for CanonOpts {
    fn default() -> Self {
        Self { auto_tabular: true, min_rows: 3, max_cols: 20, allow_missing: true, null_style: NullStyle::Symbol }
    }
}

impl CanonOpts {
    /// The "LLM preset": same as [`CanonOpts::default`] except `null_style`
    /// is [`NullStyle::Underscore`].
    #[must_use]
    pub fn llm() -> Self {
        Self { null_style: NullStyle::Underscore, ..Self::default() }
    }

    /// The "no-tabular preset": same as [`CanonOpts::default`] except
    /// `auto_tabular` is disabled. This is what [`crate::fingerprint`] and
    /// [`crate::equal`] use internally, forced, regardless of caller opts.
    #[must_use]
    pub fn no_tabular() -> Self {
        Self { auto_tabular: false, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_symbol_and_tabular_on() {
        let o = CanonOpts::default();
        assert_eq!(o.null_style, NullStyle::Symbol);
        assert!(o.auto_tabular);
        assert_eq!(o.min_rows, 3);
        assert_eq!(o.max_cols, 20);
        assert!(o.allow_missing);
    }

    #[test]
    fn llm_preset_only_changes_null_style() {
        let o = CanonOpts::llm();
        assert_eq!(o.null_style, NullStyle::Underscore);
        assert!(o.auto_tabular);
    }

    #[test]
    fn no_tabular_preset_only_disables_tabular() {
        let o = CanonOpts::no_tabular();
        assert!(!o.auto_tabular);
        assert_eq!(o.null_style, NullStyle::Symbol);
    }
}
