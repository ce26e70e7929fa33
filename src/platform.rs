//! Target platform description
use std::path::PathBuf;

/// Platform the downloader runs on. Selects the path separator
/// and the directory holding bundled third-party tools
/// (wget, gzip, crx2rnx..).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows
    Windows,
    /// Linux and MacOS
    Unix,
}

impl Platform {
    /// Resolves the platform we were compiled for.
    /// Anything that is not Windows is deliberately treated as Unix.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unix
        }
    }
    /// Path separator
    pub fn separator(&self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Unix => '/',
        }
    }
    /// Sub-directory where third-party tools are stored
    pub fn thirdparty_dir(&self) -> &'static str {
        match self {
            Self::Windows => "thirdparty_Win",
            Self::Unix => "thirdparty_Linux",
        }
    }
    /// Builds `dir` + separator + `filename`.
    /// `dir` is used verbatim, exactly like it appears in the document.
    pub fn join(&self, dir: &str, filename: &str) -> PathBuf {
        PathBuf::from(format!("{}{}{}", dir, self.separator(), filename))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::Unix => write!(f, "Linux/Mac"),
        }
    }
}
