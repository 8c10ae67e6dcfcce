pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Build-from-source installer with a stow-style symlink farm";
pub const REPOSITORY_URL: &str = "https://github.com/stowin/stowin";
pub const BIN_NAME: &str = "stowin";

/// Name of the package store directory under the shared prefix.
pub const STOW_SUBDIR: &str = "stow";

/// Default shared prefix, relative to the home directory.
pub const DEFAULT_PREFIX: &str = ".local";

/// Directories created under the shared prefix by setup. Direct children of
/// the prefix double as the set of directories the farm must never collapse.
pub const PREFIX_LAYOUT: &[&str] = &[
    "bin",
    "bin_priority",
    "lib",
    "lib64",
    "include",
    "share",
    "stow",
    "lib/pkgconfig",
    "lib64/pkgconfig",
    "lib/cmake",
    "lib64/cmake",
    "share/man",
    "share/info",
    "share/applications",
    "share/icons",
    "share/bash-completion/completions",
    "share/locale",
];

/// Marker naming the managed block in the user's shell rc file.
pub const ENV_BLOCK_MARKER: &str = "stowin environment";

/// Shell rc file the environment block is injected into, relative to home.
pub const RC_FILE: &str = ".bashrc";

/// Ignore-pattern file consumed by the symlink farm, relative to home.
pub const IGNORE_FILE: &str = ".stow-global-ignore";

/// Environment block template. `{prefix}` is replaced with the shared prefix.
pub const ENV_BLOCK_TEMPLATE: &str = r#"export STOW_DIR="{prefix}/stow"
export PATH="{prefix}/bin_priority:{prefix}/bin:$PATH"
export LD_LIBRARY_PATH="{prefix}/lib:{prefix}/lib64:$LD_LIBRARY_PATH"
export PKG_CONFIG_PATH="{prefix}/lib/pkgconfig:{prefix}/lib64/pkgconfig:$PKG_CONFIG_PATH"
export CMAKE_PREFIX_PATH="{prefix}:$CMAKE_PREFIX_PATH"
export CPATH="{prefix}/include:$CPATH"
export XDG_DATA_DIRS="{prefix}/share:$XDG_DATA_DIRS""#;

/// Patterns written to the ignore file by setup and compiled in as the
/// fallback when no ignore file exists. Patterns containing a slash match
/// against the slash-prefixed path relative to the package root; the rest
/// match against basenames.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"^/share/info/dir$",
    r"\.git",
    r"\.gitignore",
    r"\.gitmodules",
    "^/README.*",
    "^/LICENSE.*",
    "^/COPYING",
];
