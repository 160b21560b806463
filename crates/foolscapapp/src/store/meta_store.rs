use super::backend::StorageBackend;
use crate::config::FoolscapConfig;
use crate::conflict::{avoid_conflict, unique_text};
use crate::error::{FoolscapError, Result};
use crate::fuzzy::fuzzy_guess;
use crate::hooks::{
    DirectiveMacros, LogNotifier, MacroResolver, Migrator, NotificationSink, SchemaMigrator,
    BOOK_DIRECTIVE,
};
use crate::model::{Component, MetaIndex};
use crate::parser::{
    note_description, note_directives, note_tags, parse_blocks, remove_moving_lines, render_note,
    replace_title, restrict_title, sub_headings, ParsedBlock,
};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::BTreeSet;

const CMD_SEPARATOR: &str = " | ";

/// Joins editor commands into one command line: `a | b`.
pub fn format_cmds<S: AsRef<str>>(cmds: &[S]) -> String {
    cmds.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CMD_SEPARATOR)
}

fn book_directive(block: &[String]) -> Option<String> {
    note_directives(block)
        .into_iter()
        .find(|(key, value)| key == BOOK_DIRECTIVE && !value.is_empty())
        .map(|(_, value)| value)
}

fn rekey(index: &mut MetaIndex, from: &str, to: &str) -> Result<()> {
    let component = index
        .remove(from)
        .ok_or_else(|| FoolscapError::NoteNotFound(from.to_string()))?;
    index.insert(to.to_string(), component);
    Ok(())
}

/// Owner of the metadata index.
///
/// Each public method runs a full load/mutate/save cycle against the backend.
/// Hooks default to [`LogNotifier`], [`SchemaMigrator`] and [`DirectiveMacros`]
/// and can be swapped with the `with_*` builders.
pub struct MetaStore<B: StorageBackend> {
    pub(crate) backend: B,
    config: FoolscapConfig,
    notifier: Box<dyn NotificationSink>,
    migrator: Box<dyn Migrator>,
    macros: Box<dyn MacroResolver>,
}

impl<B: StorageBackend> MetaStore<B> {
    pub fn new(backend: B, config: FoolscapConfig) -> Self {
        Self {
            backend,
            config,
            notifier: Box::new(LogNotifier),
            migrator: Box::new(SchemaMigrator),
            macros: Box::new(DirectiveMacros),
        }
    }

    pub fn with_notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_migrator(mut self, migrator: impl Migrator + 'static) -> Self {
        self.migrator = Box::new(migrator);
        self
    }

    pub fn with_macros(mut self, macros: impl MacroResolver + 'static) -> Self {
        self.macros = Box::new(macros);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &FoolscapConfig {
        &self.config
    }

    // --- Index I/O ---

    /// Loads the index. An unreadable index yields an empty one.
    pub fn load_meta(&self) -> MetaIndex {
        match self.backend.load_index() {
            Ok(index) => {
                debug!("Loaded metadata index ({} components)", index.len());
                index
            }
            Err(e) => {
                warn!("Metadata index unreadable, starting empty: {}", e);
                MetaIndex::new()
            }
        }
    }

    pub fn save_meta(&self, index: &MetaIndex) -> Result<()> {
        self.backend.save_index(index)?;
        debug!("Saved metadata index ({} components)", index.len());
        Ok(())
    }

    // --- Lookups ---

    fn guess(&self, name: &str, index: &MetaIndex) -> Option<String> {
        fuzzy_guess(name, index.keys(), self.config.fuzzy_cutoff)
    }

    /// True on an exact hit, or when a fuzzy guess finds a close name.
    pub fn note_exists(&self, name: &str) -> bool {
        let index = self.load_meta();
        index.contains_key(name) || self.guess(name, &index).is_some()
    }

    /// The key `name` refers to: itself on an exact hit, else the fuzzy guess.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let index = self.load_meta();
        if index.contains_key(name) {
            return Some(name.to_string());
        }
        self.guess(name, &index)
    }

    pub fn get_component(&self, name: &str) -> Option<Component> {
        self.load_meta().remove(name)
    }

    /// Editor commands for a note joined with ` | `; `None` when it has none.
    pub fn get_cmds(&self, name: &str) -> Option<String> {
        self.load_meta()
            .get(name)
            .filter(|component| !component.vim_cmds.is_empty())
            .map(|component| format_cmds(&component.vim_cmds))
    }

    // --- Mutations ---

    /// Merges new components into the index. Existing keys are never replaced.
    pub fn add_component(&self, components: MetaIndex) -> Result<()> {
        let mut index = self.load_meta();
        if let Some(taken) = components.keys().find(|name| index.contains_key(*name)) {
            return Err(FoolscapError::Store(format!(
                "Component already exists: {}",
                taken
            )));
        }
        for name in components.keys() {
            info!("Adding component {}", name);
        }
        index.extend(components);
        self.save_meta(&index)
    }

    /// Drops a component from the index. The note text is left alone.
    pub fn remove_component(&self, name: &str) -> Result<Component> {
        let mut index = self.load_meta();
        let removed = index
            .remove(name)
            .ok_or_else(|| FoolscapError::NoteNotFound(name.to_string()))?;
        self.save_meta(&index)?;
        info!("Removed component {}", name);
        Ok(removed)
    }

    /// Re-reads a note's heading after an edit and moves its key if the heading changed.
    ///
    /// Returns the resolved name and the note's block lines. A renamed note also
    /// gets its text moved and its heading rewritten to the resolved name; the
    /// rest of the text is kept as written, minus moving lines. The renamed index
    /// is saved before the text moves, and a failed move puts the old key back.
    pub fn update_note_hooks(
        &self,
        old_name: &str,
        index: &mut MetaIndex,
    ) -> Result<(String, Vec<String>)> {
        let text = self
            .backend
            .read_note(old_name)?
            .ok_or_else(|| FoolscapError::NoteNotFound(old_name.to_string()))?;
        let lines = remove_moving_lines(&text.lines().collect::<Vec<_>>());

        let block = parse_blocks(&lines)
            .into_iter()
            .next()
            .ok_or_else(|| FoolscapError::Parse(format!("{} has no note block", old_name)))?;

        let files = self.note_files()?;
        let new_name = avoid_conflict(old_name, &restrict_title(&block.heading), |name| {
            index.contains_key(name) || files.contains(name)
        });

        if new_name != old_name {
            rekey(index, old_name, &new_name)?;
            if let Err(e) = self.save_meta(index) {
                rekey(index, &new_name, old_name)?;
                return Err(e);
            }
            if let Err(e) = self.backend.rename_note(old_name, &new_name) {
                rekey(index, &new_name, old_name)?;
                self.save_meta(index)?;
                return Err(e);
            }
            info!("Renamed {} to {}", old_name, new_name);
        }
        if block.heading != new_name {
            let mut text = replace_title(&lines, &new_name).join("\n");
            text.push('\n');
            self.backend.write_note(&new_name, &text)?;
        }

        Ok((new_name, block.lines))
    }

    fn note_files(&self) -> Result<BTreeSet<String>> {
        Ok(self.backend.list_note_names()?.into_iter().collect())
    }

    /// Re-syncs a component with its note text after an edit.
    ///
    /// Counts a view, stamps `modified`, re-derives every text-derived field and
    /// reports the tag diff. `created` is kept. Returns the (possibly new) name.
    pub fn update_component(&self, name: &str) -> Result<String> {
        let mut index = self.load_meta();
        if !index.contains_key(name) {
            return Err(FoolscapError::NoteNotFound(name.to_string()));
        }

        let (new_name, block) = self.update_note_hooks(name, &mut index)?;
        let component = index
            .get_mut(&new_name)
            .ok_or_else(|| FoolscapError::NoteNotFound(new_name.clone()))?;

        let new_tags = note_tags(&block);
        self.notifier.diff_tags(&new_tags, &component.tags, &new_name);

        component.tags = new_tags;
        component.description = note_description(&block);
        component.views += 1;
        component.modified = Utc::now();
        component.length = block.len();
        component.set_sub_headings(sub_headings(&block));
        component.vim_cmds = self.macros.get_macro(&new_name, &block).unwrap_or_default();
        if let Some(book) = book_directive(&block) {
            component.book = book;
        }

        self.save_meta(&index)?;
        Ok(new_name)
    }

    /// Creates one component per note block in `raw_lines`, in document order.
    ///
    /// Each block gets a unique name (free in the index and on disk), its own
    /// note text and a fresh component (`views = 1`). Returns the names given, empty if the text holds no block.
    pub fn new_component<S: AsRef<str>>(&self, raw_lines: &[S]) -> Result<Vec<String>> {
        let lines = remove_moving_lines(raw_lines);
        let existing = self.load_meta();
        let files = self.note_files()?;
        let now = Utc::now();
        let mut names: Vec<String> = Vec::new();

        for block in parse_blocks(&lines) {
            let name = unique_text(&restrict_title(&block.heading), |candidate| {
                existing.contains_key(candidate)
                    || files.contains(candidate)
                    || names.iter().any(|n| n == candidate)
            });
            let component = self.build_component(&name, &block, now);

            self.backend
                .write_note(&name, &render_note(&name, &block.lines))?;
            self.add_component(MetaIndex::from([(name.clone(), component)]))?;
            names.push(name);
        }

        Ok(names)
    }

    fn build_component(
        &self,
        name: &str,
        block: &ParsedBlock,
        now: chrono::DateTime<Utc>,
    ) -> Component {
        let book = book_directive(&block.lines).unwrap_or_else(|| self.config.default_book.clone());
        let mut component = Component::created_at(now, &book);
        component.description = block.description();
        component.tags = block.tags();
        component.length = block.length();
        component.set_sub_headings(block.sub_headings());
        component.vim_cmds = self.macros.get_macro(name, &block.lines).unwrap_or_default();
        component
    }

    /// Runs the schema migration once. Its errors are not caught.
    pub fn upgrade_components(&self) -> Result<()> {
        self.migrator.migrate_meta(&self.backend, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::recording::{CountingMigrator, RecordingNotifier};
    use crate::model::SubHeading;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeZone;

    const FAKE_NOTE: &str = "
# note
====================
:This is a fake note

Some content.

{textwidth:60}
{fake_tag}
====================";

    fn make_store() -> MetaStore<MemBackend> {
        MetaStore::new(MemBackend::new(), FoolscapConfig::default())
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    fn seed(store: &MetaStore<MemBackend>, names: &[&str]) {
        let index: MetaIndex = names
            .iter()
            .map(|n| (n.to_string(), Component::default()))
            .collect();
        store.save_meta(&index).unwrap();
    }

    fn old_component(views: usize) -> Component {
        let old = chrono::Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut component = Component::created_at(old, "general");
        component.views = views;
        component.tags.insert("fake_tag".to_string());
        component.description = "no_change".to_string();
        component
    }

    // --- format_cmds / get_cmds ---

    #[test]
    fn test_format_cmds() {
        let empty: [&str; 0] = [];
        assert_eq!(format_cmds(&empty), "");
        assert_eq!(format_cmds(&["one cmd"]), "one cmd");
        assert_eq!(format_cmds(&["two cmd", "two cmd"]), "two cmd | two cmd");
    }

    #[test]
    fn test_get_cmds() {
        let store = make_store();
        let mut with_cmds = Component::default();
        with_cmds.vim_cmds = vec!["test".to_string(), "test".to_string()];
        let index = MetaIndex::from([
            ("note".to_string(), with_cmds),
            ("bare".to_string(), Component::default()),
        ]);
        store.save_meta(&index).unwrap();

        assert_eq!(store.get_cmds("note"), Some("test | test".to_string()));
        assert_eq!(store.get_cmds("bare"), None);
        assert_eq!(store.get_cmds("missing"), None);
    }

    // --- load / save ---

    #[test]
    fn test_load_meta_first_run_is_empty() {
        assert!(make_store().load_meta().is_empty());
    }

    #[test]
    fn test_load_meta_corrupt_index_is_empty() {
        let store = make_store();
        seed(&store, &["note"]);
        store.backend.set_simulate_corrupt_index(true);
        assert!(store.load_meta().is_empty());
    }

    #[test]
    fn test_save_meta_propagates_write_errors() {
        let store = make_store();
        store.backend.set_simulate_write_error(true);
        assert!(store.save_meta(&MetaIndex::new()).is_err());
    }

    // --- note_exists / lookup ---

    #[test]
    fn test_note_exists_exact() {
        let store = make_store();
        seed(&store, &["note", "note_2"]);
        assert!(store.note_exists("note"));
    }

    #[test]
    fn test_note_exists_falls_back_to_fuzzy() {
        let store = make_store();
        seed(&store, &["note", "note_2"]);
        assert!(store.note_exists("nots"));
        assert_eq!(store.lookup("nots"), Some("note".to_string()));
    }

    #[test]
    fn test_note_exists_false_when_nothing_close() {
        let store = make_store();
        seed(&store, &["notes", "note_2"]);
        assert!(!store.note_exists("zebra"));
        assert_eq!(store.lookup("zebra"), None);
    }

    // --- add / remove ---

    #[test]
    fn test_add_component() {
        let store = make_store();
        seed(&store, &["note", "note_2"]);
        store
            .add_component(MetaIndex::from([(
                "new_note".to_string(),
                Component::default(),
            )]))
            .unwrap();

        let keys: Vec<_> = store.load_meta().into_keys().collect();
        assert_eq!(keys, vec!["new_note", "note", "note_2"]);
    }

    #[test]
    fn test_add_component_refuses_existing_key() {
        let store = make_store();
        seed(&store, &["note"]);
        let result = store.add_component(MetaIndex::from([("note".to_string(), old_component(9))]));
        assert!(matches!(result, Err(FoolscapError::Store(_))));
        assert_eq!(store.load_meta()["note"], Component::default());
    }

    #[test]
    fn test_remove_component() {
        let store = make_store();
        seed(&store, &["note", "note_2"]);
        store.remove_component("note").unwrap();

        let keys: Vec<_> = store.load_meta().into_keys().collect();
        assert_eq!(keys, vec!["note_2"]);
    }

    #[test]
    fn test_remove_missing_component_is_not_found() {
        let store = make_store();
        seed(&store, &["note"]);
        let result = store.remove_component("ghost");
        assert!(matches!(result, Err(FoolscapError::NoteNotFound(n)) if n == "ghost"));
        assert_eq!(store.load_meta().len(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_index() {
        let store = make_store();
        seed(&store, &["note", "note_2"]);
        let before = store.load_meta();

        store
            .add_component(MetaIndex::from([("extra".to_string(), old_component(1))]))
            .unwrap();
        store.remove_component("extra").unwrap();

        assert_eq!(store.load_meta(), before);
    }

    // --- new_component ---

    #[test]
    fn test_new_component() {
        let store = make_store();
        let names = store.new_component(&lines(FAKE_NOTE)).unwrap();
        assert_eq!(names, vec!["note"]);

        let component = store.get_component("note").unwrap();
        assert_eq!(component.description, "This is a fake note");
        assert_eq!(component.tags.iter().collect::<Vec<_>>(), vec!["fake_tag"]);
        assert!(!component.has_tag("textwidth"));
        assert_eq!(component.length, 8);
        assert_eq!(component.views, 1);
        assert_eq!(component.created, component.modified);
        assert_eq!(component.book, "general");
        assert_eq!(component.vim_cmds, vec!["set textwidth=60"]);

        let text = store.backend.read_note("note").unwrap().unwrap();
        assert!(text.starts_with("# note\n===================="));
    }

    #[test]
    fn test_multiple_new_components() {
        let store = make_store();
        let text = format!("{FAKE_NOTE}\n\n# note_2\n====\n:second\n\n{{fake_tag}}\n====");
        let names = store.new_component(&lines(&text)).unwrap();
        assert_eq!(names, vec!["note", "note_2"]);

        let index = store.load_meta();
        assert_eq!(index.len(), 2);
        assert_eq!(index["note_2"].description, "second");
        assert_eq!(index["note_2"].views, 1);
    }

    #[test]
    fn test_new_component_avoids_existing_names() {
        let store = make_store();
        seed(&store, &["note"]);
        let names = store.new_component(&lines(FAKE_NOTE)).unwrap();
        assert_eq!(names, vec!["note_0"]);

        let text = store.backend.read_note("note_0").unwrap().unwrap();
        assert!(text.starts_with("# note_0\n"));
    }

    #[test]
    fn test_new_component_same_heading_twice_in_one_draft() {
        let store = make_store();
        let text = format!("{FAKE_NOTE}\n{FAKE_NOTE}");
        let names = store.new_component(&lines(&text)).unwrap();
        assert_eq!(names, vec!["note", "note_0"]);
    }

    #[test]
    fn test_new_component_avoids_orphan_note_files() {
        let store = make_store();
        store
            .backend
            .write_note("note", "precious orphan text")
            .unwrap();

        let names = store.new_component(&lines(FAKE_NOTE)).unwrap();
        assert_eq!(names, vec!["note_0"]);
        assert_eq!(
            store.backend.read_note("note").unwrap().as_deref(),
            Some("precious orphan text")
        );
    }

    #[test]
    fn test_new_component_strips_moving_lines() {
        let store = make_store();
        let text = "# moved\n====\n:desc\nkeep\n>gone\n====";
        store.new_component(&lines(text)).unwrap();

        let note = store.backend.read_note("moved").unwrap().unwrap();
        assert!(!note.contains("gone"));
        assert_eq!(store.get_component("moved").unwrap().length, 4);
    }

    #[test]
    fn test_new_component_without_blocks() {
        let store = make_store();
        let names = store.new_component(&["just", "text"]).unwrap();
        assert!(names.is_empty());
        assert!(store.load_meta().is_empty());
    }

    #[test]
    fn test_new_component_book_directive() {
        let store = make_store();
        store
            .new_component(&lines("# todo\n====\n:things\n{book:work}\n===="))
            .unwrap();
        let component = store.get_component("todo").unwrap();
        assert_eq!(component.book, "work");
        assert!(component.vim_cmds.is_empty());
    }

    #[test]
    fn test_new_component_sub_headings() {
        let store = make_store();
        let text = "# note\n====\n:This tests subheadings\n\nFirst test:\n:this is the first sub\nbody\nSecond test:\n:this is the 2nd sub\nbody\n{subheadings} {test}\n====";
        store.new_component(&lines(text)).unwrap();

        let component = store.get_component("note").unwrap();
        assert_eq!(component.length, 11);
        assert_eq!(component.num_sub, 2);
        assert_eq!(
            component.sub_headings,
            vec![
                SubHeading::new("First test:", ":this is the first sub", 3, 6),
                SubHeading::new("Second test:", ":this is the 2nd sub", 6, 10),
            ]
        );
    }

    // --- update_note_hooks ---

    #[test]
    fn test_update_note_hooks_unchanged_name() {
        let store = make_store();
        seed(&store, &["notes", "note_2"]);
        store
            .backend
            .write_note("notes", "# notes\n====\n:d\nmock content\n====\n")
            .unwrap();

        let mut index = store.load_meta();
        let (name, block) = store.update_note_hooks("notes", &mut index).unwrap();
        assert_eq!(name, "notes");
        assert_eq!(block, vec!["====", ":d", "mock content", "===="]);
        assert!(index.contains_key("notes"));
    }

    #[test]
    fn test_update_note_hooks_renamed_heading() {
        let store = make_store();
        seed(&store, &["notes", "note_2"]);
        store
            .backend
            .write_note("notes", "# New Name\n====\nmock content\n====\n")
            .unwrap();

        let mut index = store.load_meta();
        let before = index["notes"].clone();
        let (name, _) = store.update_note_hooks("notes", &mut index).unwrap();

        assert_eq!(name, "new_name");
        let keys: Vec<_> = index.keys().cloned().collect();
        assert_eq!(keys, vec!["new_name", "note_2"]);
        assert_eq!(index["new_name"], before);

        assert_eq!(store.backend.read_note("notes").unwrap(), None);
        let text = store.backend.read_note("new_name").unwrap().unwrap();
        assert!(text.starts_with("# new_name\n"));
    }

    #[test]
    fn test_update_note_hooks_rename_into_conflict() {
        let store = make_store();
        seed(&store, &["notes", "note_2"]);
        store
            .backend
            .write_note("notes", "# note_2\n====\nbody\n====\n")
            .unwrap();

        let mut index = store.load_meta();
        let (name, _) = store.update_note_hooks("notes", &mut index).unwrap();
        assert_eq!(name, "note_2_0");
        assert!(index.contains_key("note_2"));
        assert!(index.contains_key("note_2_0"));
    }

    #[test]
    fn test_update_note_hooks_avoids_orphan_note_files() {
        let store = make_store();
        seed(&store, &["notes"]);
        store
            .backend
            .write_note("notes", "# Orphan\n====\nbody\n====\n")
            .unwrap();
        store
            .backend
            .write_note("orphan", "precious orphan text")
            .unwrap();

        let mut index = store.load_meta();
        let (name, _) = store.update_note_hooks("notes", &mut index).unwrap();
        assert_eq!(name, "orphan_0");
        assert_eq!(
            store.backend.read_note("orphan").unwrap().as_deref(),
            Some("precious orphan text")
        );
    }

    #[test]
    fn test_update_note_hooks_ignores_stray_heading() {
        let store = make_store();
        seed(&store, &["notes"]);
        store
            .backend
            .write_note("notes", "# stray\n# Real\n====\n:d\n====\n")
            .unwrap();

        let mut index = store.load_meta();
        let (name, block) = store.update_note_hooks("notes", &mut index).unwrap();
        assert_eq!(name, "real");
        assert_eq!(block, vec!["====", ":d", "===="]);
        assert_eq!(
            store.backend.read_note("real").unwrap().as_deref(),
            Some("# stray\n# real\n====\n:d\n====\n")
        );
    }

    #[test]
    fn test_update_note_hooks_failed_index_save_keeps_old_key() {
        let store = make_store();
        seed(&store, &["notes"]);
        store
            .backend
            .write_note("notes", "# New Name\n====\nbody\n====\n")
            .unwrap();

        let mut index = store.load_meta();
        store.backend.set_simulate_index_write_error(true);
        let result = store.update_note_hooks("notes", &mut index);

        assert!(matches!(result, Err(FoolscapError::Store(_))));
        assert!(index.contains_key("notes"));
        assert!(!index.contains_key("new_name"));
        assert_eq!(store.backend.list_note_names().unwrap(), vec!["notes"]);
    }

    #[test]
    fn test_update_note_hooks_missing_text() {
        let store = make_store();
        seed(&store, &["notes"]);
        let mut index = store.load_meta();
        let result = store.update_note_hooks("notes", &mut index);
        assert!(matches!(result, Err(FoolscapError::NoteNotFound(_))));
    }

    // --- update_component ---

    #[test]
    fn test_update_component() {
        let notifier = RecordingNotifier::new();
        let store = make_store().with_notifier(notifier.clone());
        let original = old_component(2);
        store
            .save_meta(&MetaIndex::from([("note".to_string(), original.clone())]))
            .unwrap();
        store
            .backend
            .write_note(
                "note",
                "# note\n====\n:This is a fake note\n{fake_tag} {new_tag}\n====\n",
            )
            .unwrap();

        let name = store.update_component("note").unwrap();
        assert_eq!(name, "note");

        let updated = store.get_component("note").unwrap();
        assert_eq!(updated.views, 3);
        assert_eq!(updated.created, original.created);
        assert_ne!(updated.modified, original.modified);
        assert_eq!(updated.description, "This is a fake note");
        assert_eq!(updated.length, 4);
        assert_eq!(
            updated.tags.iter().collect::<Vec<_>>(),
            vec!["fake_tag", "new_tag"]
        );

        assert_eq!(
            notifier.calls(),
            vec![(
                vec!["fake_tag".to_string(), "new_tag".to_string()],
                vec!["fake_tag".to_string()],
                "note".to_string()
            )]
        );
    }

    #[test]
    fn test_update_component_after_rename_keeps_history() {
        let store = make_store();
        store
            .save_meta(&MetaIndex::from([("note".to_string(), old_component(5))]))
            .unwrap();
        store
            .backend
            .write_note("note", "# Renamed Note\n====\n:d\n====\n")
            .unwrap();

        let name = store.update_component("note").unwrap();
        assert_eq!(name, "renamed_note");

        let index = store.load_meta();
        assert!(!index.contains_key("note"));
        assert_eq!(index["renamed_note"].views, 6);
    }

    #[test]
    fn test_update_component_retries_after_failed_index_save() {
        let store = make_store();
        store
            .save_meta(&MetaIndex::from([("note".to_string(), old_component(5))]))
            .unwrap();
        store
            .backend
            .write_note("note", "# Renamed Note\n====\n:d\n====\n")
            .unwrap();

        store.backend.set_simulate_index_write_error(true);
        assert!(store.update_component("note").is_err());
        let keys: Vec<_> = store.load_meta().into_keys().collect();
        assert_eq!(keys, vec!["note"]);
        assert_eq!(store.backend.list_note_names().unwrap(), vec!["note"]);

        store.backend.set_simulate_index_write_error(false);
        assert_eq!(store.update_component("note").unwrap(), "renamed_note");
        assert_eq!(store.load_meta()["renamed_note"].views, 6);
        assert_eq!(store.backend.list_note_names().unwrap(), vec!["renamed_note"]);
    }

    #[test]
    fn test_update_component_missing_name() {
        let store = make_store();
        let result = store.update_component("ghost");
        assert!(matches!(result, Err(FoolscapError::NoteNotFound(_))));
    }

    #[test]
    fn test_lifecycle_restarts_after_removal() {
        let store = make_store();
        store.new_component(&lines(FAKE_NOTE)).unwrap();
        store.update_component("note").unwrap();
        assert_eq!(store.get_component("note").unwrap().views, 2);

        store.remove_component("note").unwrap();
        store.new_component(&lines(FAKE_NOTE)).unwrap();
        assert_eq!(store.get_component("note").unwrap().views, 1);
    }

    // --- upgrade_components ---

    #[test]
    fn test_upgrade_components_runs_migrator_once() {
        let migrator = CountingMigrator::new();
        let store = make_store().with_migrator(migrator.clone());
        store.upgrade_components().unwrap();
        assert_eq!(migrator.runs(), 1);
    }

    #[test]
    fn test_upgrade_components_propagates_failure() {
        let store = make_store().with_migrator(CountingMigrator::failing());
        let result = store.upgrade_components();
        assert!(matches!(result, Err(FoolscapError::Migration(_))));
    }
}
