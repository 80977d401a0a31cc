//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls core or engine to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT touch the repository except through a label store.

mod advance;
mod completion;
mod label;
mod review;
mod transitions;
mod validate;

// Re-export command functions for testing and direct invocation
pub use advance::advance;
pub use completion::completion;
pub use label::{get as label_get, list as label_list, set as label_set};
pub use review::review;
pub use transitions::transitions;
pub use validate::validate;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, LabelAction};
use crate::core::config::Config;
use crate::core::label::Label;
use crate::core::store::TagLabelStore;
use crate::core::types::BranchName;
use crate::engine::Context;
use crate::git::Git;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Label { action } => match action {
            LabelAction::Get { branch } => label::get(ctx, &branch),
            LabelAction::Set { branch, label } => label::set(ctx, &branch, &label),
            LabelAction::List { json } => label::list(ctx, json),
        },
        Command::Transitions { label } => transitions::transitions(ctx, &label),
        Command::Advance {
            branch,
            label,
            manifest,
            reviews,
        } => advance::advance(ctx, &branch, &label, manifest.as_deref(), &reviews),
        Command::Validate { manifest } => validate::validate(ctx, manifest.as_deref()),
        Command::Review { path } => review::review(ctx, &path),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// An opened repository with its configuration.
pub(crate) struct Workspace {
    pub store: TagLabelStore,
    pub config: Config,
    /// Repository root (the git dir for bare repositories)
    pub root: PathBuf,
}

/// Open the repository containing the context's working directory.
pub(crate) fn open_workspace(ctx: &Context) -> Result<Workspace> {
    let cwd = ctx.cwd().context("Failed to determine working directory")?;
    let git = Git::open(&cwd).context("Failed to open repository")?;

    let info = git.info();
    let config =
        Config::load(Some(info.git_dir.as_path())).context("Failed to load configuration")?;
    tracing::debug!(
        global = ?config.global_path(),
        repo = ?config.repo_path(),
        "loaded configuration"
    );
    let root = info.work_dir.unwrap_or(info.git_dir);

    let store = TagLabelStore::new(git)
        .with_remote(config.remote())
        .with_remote_sync(config.sync_tags());

    Ok(Workspace {
        store,
        config,
        root,
    })
}

/// Resolve the manifest to use: an explicit path, or the configured one.
///
/// Relative explicit paths are taken relative to the working directory.
pub(crate) fn manifest_location(
    ctx: &Context,
    root: &Path,
    config: &Config,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
        Some(path) => Ok(ctx.cwd()?.join(path)),
        None => Ok(root.join(config.manifest_path())),
    }
}

pub(crate) fn parse_branch(branch: &str) -> Result<BranchName> {
    BranchName::new(branch).context("Invalid branch")
}

pub(crate) fn parse_label(label: &str) -> Result<Label> {
    label.parse::<Label>().with_context(|| {
        let known: Vec<&str> = Label::ALL.iter().map(|l| l.short()).collect();
        format!("Expected one of: {}", known.join(", "))
    })
}
