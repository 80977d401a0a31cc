//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cindy - label-driven deployment pipeline over git tags
#[derive(Parser, Debug)]
#[command(name = "cindy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if cindy was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read or write branch labels directly
    #[command(
        name = "label",
        long_about = "Read or write branch labels directly.\n\n\
            Labels are stored as tags named cindy/<label>/<branch>. `label set` \
            writes unconditionally and skips transition and gate checks; use \
            `advance` for normal pipeline moves."
    )]
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Show the labels a label may move to
    Transitions {
        /// Label, short or qualified form (e.g. approved, cindy:approved)
        label: String,
    },

    /// Move a branch to a new label, enforcing transitions and gates
    #[command(
        name = "advance",
        long_about = "Move a branch to a new label.\n\n\
            The move must be allowed by the transition table. Moves into \
            approved, deploying or deployed are additionally gated: the manifest's \
            schema changes must be additive and no review may request changes \
            with unresolved comments.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Start the pipeline for a branch
    cindy advance feature/foo ready

    # Approve, checking the branch manifest and a review
    cindy advance feature/foo approved --manifest .cindy/manifest.json --review review-001.json"
    )]
    Advance {
        /// Branch to move
        branch: String,

        /// Target label
        label: String,

        /// Manifest to check (defaults to the configured manifest path if it exists)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Review file(s) to check
        #[arg(long = "review", value_name = "PATH")]
        reviews: Vec<PathBuf>,
    },

    /// Check a manifest's schema changes
    Validate {
        /// Manifest to check (defaults to the configured manifest path)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Show whether a review blocks progression
    Review {
        /// Review file
        path: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    cindy completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    cindy completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Label subcommands.
#[derive(Subcommand, Debug)]
pub enum LabelAction {
    /// Print a branch's label
    Get {
        /// Branch name
        branch: String,
    },
    /// Set a branch's label unconditionally
    Set {
        /// Branch name
        branch: String,
        /// Label, short or qualified form
        label: String,
    },
    /// List every labeled branch
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
