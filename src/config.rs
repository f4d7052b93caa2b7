use std::ffi::OsString;

/// Name of the environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "MINISH_LOG";

/// Written before every read.
pub const PROMPT: &str = "$ ";

/// Source of the directory list used to resolve bare command names.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Read `PATH` from the process environment on every lookup.
    Inherited,
    /// A fixed colon-delimited list.
    Fixed(OsString),
}

impl SearchPath {
    /// The current directory list, or `None` when nothing is configured.
    pub fn resolve(&self) -> Option<OsString> {
        match self {
            SearchPath::Inherited => std::env::var_os("PATH"),
            SearchPath::Fixed(dirs) => Some(dirs.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub search_path: SearchPath,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            search_path: SearchPath::Inherited,
            log_filter: None,
        };
    }
}

impl Config {
    pub fn from_env() -> Self {
        let log_filter = std::env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty());

        return Self {
            log_filter,
            ..Self::default()
        };
    }

    pub fn with_search_path(mut self, dirs: impl Into<OsString>) -> Self {
        self.search_path = SearchPath::Fixed(dirs.into());
        return self;
    }
}
