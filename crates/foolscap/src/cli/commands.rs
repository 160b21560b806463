use super::editor::{draft_in_editor, open_in_editor};
use super::print::{print_contents, print_messages, print_notes, print_tags};
use super::setup::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use foolscapapp::api::FoolscapApi;
use foolscapapp::commands::list::ListFilter;
use foolscapapp::commands::new::NOTE_TEMPLATE;
use foolscapapp::config::FoolscapPaths;
use foolscapapp::store::fs_backend::FsBackend;
use std::path::Path;

type Api = FoolscapApi<FsBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FoolscapPaths::from_env()?;
    log::debug!("Storage root: {}", paths.root.display());
    let api = FoolscapApi::open(paths)?;

    match cli.command {
        Some(Commands::New { file }) => handle_new(&api, file.as_deref()),
        Some(Commands::Edit { name }) => handle_edit(&api, &name),
        Some(Commands::Save { name }) => {
            let result = api.save_note(&name)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::View { name }) => {
            let result = api.view_note(&name)?;
            print_messages(&result.messages);
            print_contents(&result.contents);
            Ok(())
        }
        Some(Commands::List { tag, book }) => handle_list(&api, ListFilter { tag, book }),
        None => handle_list(&api, ListFilter::default()),
        Some(Commands::Search { term }) => {
            let result = api.search(&term)?;
            print_notes(&result.listed_notes);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Tags) => {
            let result = api.tags()?;
            print_tags(&result.tag_counts);
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Delete { name }) => {
            let result = api.delete_note(&name)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Upgrade) => {
            let result = api.upgrade()?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn handle_new(api: &Api, file: Option<&Path>) -> Result<()> {
    let result = match file {
        Some(path) => api
            .new_note_from_file(path)
            .with_context(|| format!("Could not create notes from {}", path.display()))?,
        None => {
            let draft = draft_in_editor(NOTE_TEMPLATE)?;
            api.new_note(&draft.lines().collect::<Vec<_>>())?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(api: &Api, name: &str) -> Result<()> {
    let target = api.edit_target(name)?;
    print_messages(&target.messages);

    let resolved = target
        .affected_notes
        .first()
        .context("Edit target did not resolve to a note")?;
    let path = target
        .note_paths
        .first()
        .context("Edit target has no note file")?;
    open_in_editor(path, target.editor_cmds.as_deref())?;

    let saved = api.save_note(resolved)?;
    print_messages(&saved.messages);
    Ok(())
}

fn handle_list(api: &Api, filter: ListFilter) -> Result<()> {
    let result = api.list_notes(&filter)?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}
