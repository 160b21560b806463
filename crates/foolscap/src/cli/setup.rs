use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "foolscap",
    bin_name = "foolscap",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Plain-text notes with headings, tags and descriptions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Create notes from a draft file, or from a template opened in the editor
    #[command(alias = "n", display_order = 1)]
    New {
        /// Draft file holding one or more note blocks
        file: Option<PathBuf>,
    },

    /// Open a note in the editor, then save it
    #[command(alias = "e", display_order = 2)]
    Edit {
        /// Note name (close misspellings are accepted)
        name: String,
    },

    /// Re-sync a note's metadata after editing it outside foolscap
    #[command(display_order = 3)]
    Save {
        /// Note name
        name: String,
    },

    /// Print a note
    #[command(alias = "v", display_order = 4)]
    View {
        /// Note name (close misspellings are accepted)
        name: String,
    },

    /// List notes
    #[command(alias = "ls", display_order = 5)]
    List {
        /// Only notes carrying this tag
        #[arg(long, short)]
        tag: Option<String>,

        /// Only notes in this book
        #[arg(long, short)]
        book: Option<String>,
    },

    /// Search names, descriptions and tags
    #[command(display_order = 6)]
    Search {
        /// Search term
        term: String,
    },

    /// Show tags and how many notes use them
    #[command(display_order = 7)]
    Tags,

    /// Move a note to the recycle bin
    #[command(alias = "rm", display_order = 8)]
    Delete {
        /// Exact note name
        name: String,
    },

    /// Rewrite the metadata index in the current format
    #[command(display_order = 9)]
    Upgrade,
}
