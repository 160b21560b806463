use anyhow::{bail, Context, Result};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITOR: &str = "vim";

/// Editor command from `$EDITOR`, then `$VISUAL`, then `vim`.
pub fn get_editor() -> String {
    ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Program and arguments for one editor run. The editor value may carry its
/// own flags (`code -w`); vim commands go in as a single `-c` argument.
pub fn editor_invocation(editor: &str, path: &Path, cmds: Option<&str>) -> (String, Vec<OsString>) {
    let mut words = editor.split_whitespace();
    let program = words.next().unwrap_or(FALLBACK_EDITOR).to_string();
    let mut args: Vec<OsString> = words.map(OsString::from).collect();
    if let Some(cmds) = cmds.filter(|c| !c.is_empty()) {
        args.push("-c".into());
        args.push(cmds.into());
    }
    args.push(path.as_os_str().to_owned());
    (program, args)
}

/// Opens `path` in the editor and waits for it to close.
pub fn open_in_editor(path: &Path, cmds: Option<&str>) -> Result<()> {
    let editor = get_editor();
    let (program, args) = editor_invocation(&editor, path, cmds);
    log::debug!("Launching {} {:?}", program, args);

    let status = Command::new(&program)
        .args(&args)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        bail!("Editor '{}' exited with non-zero status", editor);
    }
    Ok(())
}

/// Opens a scratch file holding `template` and returns what the user saved.
pub fn draft_in_editor(template: &str) -> Result<String> {
    let draft = env::temp_dir().join(format!("foolscap_draft_{}.txt", std::process::id()));
    fs::write(&draft, template).context("Failed to write draft")?;

    let edited = open_in_editor(&draft, None).and_then(|_| {
        fs::read_to_string(&draft).context("Failed to read draft back")
    });
    let _ = fs::remove_file(&draft);
    edited
}
