use std::path::PathBuf;

/// How short-form names are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One name per line.
    OnePerLine,
    /// Top-to-bottom columns fitted into `width` terminal columns.
    Columns { width: usize },
}

/// Everything a listing run needs from the caller. Built once and passed
/// by reference to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Targets in the order given; never empty.
    pub paths: Vec<PathBuf>,
    /// Include dotfiles and the `.` self-entry.
    pub show_all: bool,
    /// Use the long row format.
    pub long_listing: bool,
    pub layout: Layout,
}

impl ListingRequest {
    /// Request for `paths`, defaulting to the current directory when empty.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let paths = if paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            paths
        };
        Self {
            paths,
            show_all: false,
            long_listing: false,
            layout: Layout::OnePerLine,
        }
    }

    /// Directory headers are only printed when several targets were named.
    pub fn shows_headers(&self) -> bool {
        self.paths.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_paths_default_to_cwd() {
        let req = ListingRequest::new(Vec::new());
        assert_eq!(req.paths, vec![PathBuf::from(".")]);
        assert!(!req.shows_headers());
    }

    #[test]
    fn headers_only_for_several_paths() {
        let req = ListingRequest::new(vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(req.shows_headers());
    }
}
