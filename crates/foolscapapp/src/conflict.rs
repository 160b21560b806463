//! Name conflict resolution.
//!
//! Index keys double as note file names, so two components can never share a
//! name. When a new or renamed note would collide, a numeric suffix is appended
//! (`note_2` → `note_2_0` → `note_2_1` ...). Both functions are pure: the same
//! inputs always produce the same name.

/// `base` if it is free, otherwise `base_N` for the smallest free `N`.
pub fn unique_text<F>(base: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }
    (0usize..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Resolves the name a note should get when renamed from `old_name` to `new_name`.
///
/// Renaming to the same name is a no-op, and a name that only collides with
/// `old_name` itself is free to take.
pub fn avoid_conflict<F>(old_name: &str, new_name: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if new_name == old_name {
        return old_name.to_string();
    }
    unique_text(new_name, |name| name != old_name && is_taken(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn index() -> BTreeMap<String, u32> {
        BTreeMap::from([("notes".to_string(), 1), ("note_2".to_string(), 2)])
    }

    #[test]
    fn test_unchanged_name_is_kept() {
        let idx = index();
        assert_eq!(avoid_conflict("notes", "notes", |n| idx.contains_key(n)), "notes");
    }

    #[test]
    fn test_free_name_is_used_as_is() {
        let idx = index();
        assert_eq!(avoid_conflict("notes", "rename", |n| idx.contains_key(n)), "rename");
    }

    #[test]
    fn test_taken_name_gets_suffix() {
        let idx = index();
        assert_eq!(
            avoid_conflict("notes", "note_2", |n| idx.contains_key(n)),
            "note_2_0"
        );
    }

    #[test]
    fn test_suffix_skips_taken_suffixes() {
        let taken = ["note", "note_0", "note_1"];
        assert_eq!(unique_text("note", |n| taken.contains(&n)), "note_2");
    }

    #[test]
    fn test_unique_text_free_base() {
        assert_eq!(unique_text("fresh", |_| false), "fresh");
    }

    #[test]
    fn test_unique_text_is_deterministic() {
        let idx = index();
        let first = unique_text("notes", |n| idx.contains_key(n));
        let second = unique_text("notes", |n| idx.contains_key(n));
        assert_eq!(first, second);
        assert_eq!(first, "notes_0");
    }
}
