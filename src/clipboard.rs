/*!
 * Clipboard support for FileGather
 *
 * Knows the command lines of the common clipboard-set utilities and picks
 * a sensible primary/fallback pair for the current platform.
 */

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use clap::ValueEnum;
use strum::Display;

use crate::launcher::CommandSpec;

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
pub enum ClipboardProvider {
    /// tmux clipboard
    #[strum(to_string = "tmux")]
    Tmux,
    /// X11 clipboard with xclip
    #[strum(to_string = "xclip")]
    Xclip,
    /// X11 clipboard with xsel
    #[strum(to_string = "xsel")]
    Xsel,
    /// Wayland clipboard
    #[strum(to_string = "wl-copy")]
    Wayland,
    /// macOS clipboard
    #[strum(to_string = "pbcopy")]
    MacOS,
    /// Windows clipboard (via WSL)
    #[strum(to_string = "clip.exe")]
    Wsl,
    /// Termux clipboard
    #[strum(to_string = "termux-clipboard-set")]
    Termux,
}

impl ClipboardProvider {
    /// Command line that reads the clipboard content from stdin
    pub fn command(&self) -> CommandSpec {
        match self {
            Self::Tmux => CommandSpec::with_args("tmux", ["load-buffer", "-w", "-"]),
            Self::Xclip => CommandSpec::with_args("xclip", ["-selection", "clipboard", "-in"]),
            Self::Xsel => CommandSpec::with_args("xsel", ["-b", "-i"]),
            Self::Wayland => CommandSpec::new("wl-copy"),
            Self::MacOS => CommandSpec::new("pbcopy"),
            Self::Wsl => CommandSpec::new("clip.exe"),
            Self::Termux => CommandSpec::new("termux-clipboard-set"),
        }
    }
}

//--------------------------------------------------------------------
// Public API
//--------------------------------------------------------------------

/// Default primary and fallback providers for the running platform
pub fn default_providers() -> (ClipboardProvider, ClipboardProvider) {
    match get_platform() {
        "macos" => (ClipboardProvider::MacOS, ClipboardProvider::Tmux),
        "windows" | "wsl" => (ClipboardProvider::Wsl, ClipboardProvider::Xclip),
        "android" => (ClipboardProvider::Termux, ClipboardProvider::Tmux),
        _ => (ClipboardProvider::Wayland, ClipboardProvider::Xclip),
    }
}

/// Check if a command exists on the system
///
/// # Arguments
/// * `command` - The command to check
///
/// # Returns
/// * `true` - If the command exists and can be executed
/// * `false` - Otherwise
pub fn command_exists(command: &str) -> bool {
    // First check if the command exists in the PATH
    if let Some(paths) = env::var_os("PATH") {
        if env::split_paths(&paths).any(|dir| dir.join(command).exists()) {
            return true;
        }
    }

    // An explicit path to an executable
    if command.contains(std::path::MAIN_SEPARATOR) && Path::new(command).exists() {
        return true;
    }

    // Try to run the command with '--version' flag as fallback
    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

//--------------------------------------------------------------------
// Internal Implementation
//--------------------------------------------------------------------

/// Platform detection cache (using thread-safe lazy initialization)
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else if cfg!(target_os = "android") {
            "android"
        } else {
            "unknown"
        }
    })
}
