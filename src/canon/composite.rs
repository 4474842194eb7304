//! Composite canonicalization (§4.C): `List`, `Map`, `Struct`, `Sum`.
//!
//! Composite forms never carry their own escaping rules beyond what their
//! scalar children already produce — the container syntax (brackets,
//! `key=value`, `Tag(...)`) is unambiguous because bare strings can never
//! contain the delimiter characters.

use crate::options::CanonOpts;
use crate::value::{Struct, Sum};

use super::scalar::canon_string;

/// `key=value`, byte-sorted by the canonical form of the key. Shared by
/// `Map` and `Struct` field emission.
pub(super) fn canon_entries(entries: &[(String, crate::value::Value)], opts: &CanonOpts, canon_value: impl Fn(&crate::value::Value, &CanonOpts) -> String) -> String {
    let mut rendered: Vec<(String, String)> =
        entries.iter().map(|(k, v)| (canon_string(k), canon_value(v, opts))).collect();
    rendered.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    rendered
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `[` + single-space-joined canonical elements + `]`; `[]` when empty.
/// Always bracketed, including when nested inside another `List` — the
/// brackets are what make a `List` self-delimiting among its siblings.
pub(super) fn canon_list(items: &[crate::value::Value], opts: &CanonOpts, canon_value: impl Fn(&crate::value::Value, &CanonOpts) -> String) -> String {
    let inner = items.iter().map(|v| canon_value(v, opts)).collect::<Vec<_>>().join(" ");
    format!("[{inner}]")
}

/// `{}` when empty, else `{k1=v1 k2=v2 ...}` byte-sorted by key.
pub(super) fn canon_map(entries: &[(String, crate::value::Value)], opts: &CanonOpts, canon_value: impl Fn(&crate::value::Value, &CanonOpts) -> String) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    format!("{{{}}}", canon_entries(entries, opts, canon_value))
}

/// `TypeName{}` when empty, else `TypeName{k1=v1 k2=v2 ...}` byte-sorted by
/// key. The type name is always a bare string: it is emitted as written,
/// never quoted, since struct type names are identifiers by construction.
pub(super) fn canon_struct(s: &Struct, opts: &CanonOpts, canon_value: impl Fn(&crate::value::Value, &CanonOpts) -> String) -> String {
    if s.fields.is_empty() {
        format!("{}{{}}", s.type_name)
    } else {
        format!("{}{{{}}}", s.type_name, canon_entries(&s.fields, opts, canon_value))
    }
}

/// `Tag` alone when there is no payload, else `Tag(value)`.
pub(super) fn canon_sum(s: &Sum, opts: &CanonOpts, canon_value: impl Fn(&crate::value::Value, &CanonOpts) -> String) -> String {
    match &s.value {
        None => canon_string(&s.tag),
        Some(v) => format!("{}({})", canon_string(&s.tag), canon_value(v, opts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::canonicalize_value;
    use crate::value::Value;

    #[test]
    fn empty_forms() {
        assert_eq!(canon_list(&[], &CanonOpts::no_tabular(), canonicalize_value), "[]");
        assert_eq!(canon_map(&[], &CanonOpts::no_tabular(), canonicalize_value), "{}");
    }

    #[test]
    fn list_is_bracketed_and_space_joined() {
        let items = vec![Value::int(1), Value::int(2), Value::int(3)];
        assert_eq!(canon_list(&items, &CanonOpts::no_tabular(), canonicalize_value), "[1 2 3]");
    }

    #[test]
    fn nested_list_keeps_its_own_brackets() {
        let items = vec![Value::list(vec![Value::int(1), Value::int(2)]), Value::list(vec![Value::int(3), Value::int(4)])];
        assert_eq!(canon_list(&items, &CanonOpts::no_tabular(), canonicalize_value), "[[1 2] [3 4]]");
        let with_empty = vec![Value::list(vec![]), Value::int(9)];
        assert_eq!(canon_list(&with_empty, &CanonOpts::no_tabular(), canonicalize_value), "[[] 9]");
    }

    #[test]
    fn map_sorts_keys_by_bytes() {
        let entries = vec![("zeta".to_string(), Value::int(1)), ("alpha".to_string(), Value::int(2))];
        assert_eq!(canon_map(&entries, &CanonOpts::no_tabular(), canonicalize_value), "{alpha=2 zeta=1}");
    }

    #[test]
    fn struct_carries_type_name_unquoted() {
        let s = Struct { type_name: "Team".to_string(), fields: vec![("name".to_string(), Value::str("Arsenal"))] };
        assert_eq!(canon_struct(&s, &CanonOpts::no_tabular(), canonicalize_value), "Team{name=Arsenal}");
    }

    #[test]
    fn struct_with_no_fields() {
        let s = Struct { type_name: "Unit".to_string(), fields: vec![] };
        assert_eq!(canon_struct(&s, &CanonOpts::no_tabular(), canonicalize_value), "Unit{}");
    }

    #[test]
    fn sum_with_and_without_payload() {
        let none = Sum { tag: "None".to_string(), value: None };
        let some = Sum { tag: "Some".to_string(), value: Some(Box::new(Value::int(7))) };
        assert_eq!(canon_sum(&none, &CanonOpts::no_tabular(), canonicalize_value), "None");
        assert_eq!(canon_sum(&some, &CanonOpts::no_tabular(), canonicalize_value), "Some(7)");
    }

    #[test]
    fn sum_tag_goes_through_string_canonicalization() {
        let reserved = Sum { tag: "null".to_string(), value: None };
        assert_eq!(canon_sum(&reserved, &CanonOpts::no_tabular(), canonicalize_value), "\"null\"");
        let with_payload = Sum { tag: "a b".to_string(), value: Some(Box::new(Value::int(1))) };
        assert_eq!(canon_sum(&with_payload, &CanonOpts::no_tabular(), canonicalize_value), "\"a b\"(1)");
    }
}
