//! # File-Set Validation
//!
//! Whole-lesson checks over the set of document paths, run once after
//! every document has been loaded:
//!
//! 1. Every catalogued file ([`REQUIRED_FILES`]) is present. Files not in
//!    the catalogue are never flagged.
//! 2. Every file under an episode directory is named `NN-slug.md` and sits
//!    directly inside that directory.
//! 3. Episode numbers taken from well-formed names are unique and, once
//!    sorted, consecutive. The first episode may have any number; zero or
//!    one episode is never a numbering problem.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use lesson_core::{Violation, ViolationKind};

use crate::catalogue::{RequiredFile, EPISODE_DIR, REQUIRED_FILES};
use crate::error::{compile, RuleError};

/// Well-formed episode filename: two-digit number, hyphenated slug.
pub const EPISODE_FILENAME: &str = r"^(\d\d)-[-\w]+\.md$";

/// Cross-document checks over a lesson's file set.
#[derive(Debug, Clone)]
pub struct FileSetValidator {
    required: &'static [RequiredFile],
    episode_filename: Regex,
}

impl FileSetValidator {
    /// Validator over the standard catalogue.
    pub fn new() -> Result<Self, RuleError> {
        Self::with_required(REQUIRED_FILES)
    }

    /// Validator over a custom required-file catalogue.
    pub fn with_required(required: &'static [RequiredFile]) -> Result<Self, RuleError> {
        Ok(Self {
            required,
            episode_filename: compile(EPISODE_FILENAME)?,
        })
    }

    /// Run all three file-set checks.
    pub fn check_file_set<P: AsRef<Path>>(&self, source_root: &Path, present: &[P]) -> Vec<Violation> {
        let mut violations = self.check_required(source_root, present);

        let (numbers, malformed) = self.episode_numbers(present);
        violations.extend(malformed);
        violations.extend(check_numbering(&numbers));
        violations
    }

    /// One violation per catalogued file missing from `present`, in
    /// catalogue order.
    pub fn check_required<P: AsRef<Path>>(&self, source_root: &Path, present: &[P]) -> Vec<Violation> {
        let present: BTreeSet<&Path> = present.iter().map(AsRef::as_ref).collect();
        self.required
            .iter()
            .map(|file| file.resolve(source_root))
            .filter(|path| !present.contains(path.as_path()))
            .map(|path| {
                Violation::new(
                    ViolationKind::MissingRequiredFile,
                    None,
                    format!("Missing required file {}", path.display()),
                )
            })
            .collect()
    }

    /// Episode number of a well-formed episode path, if it is one.
    pub fn episode_number(&self, path: &Path) -> Option<u32> {
        let in_episode_dir = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|dir| dir == EPISODE_DIR);
        if !in_episode_dir {
            return None;
        }
        let name = path.file_name()?.to_str()?;
        let captures = self.episode_filename.captures(name)?;
        captures.get(1)?.as_str().parse().ok()
    }

    /// Numbers of well-formed episodes, plus one violation per malformed
    /// episode path. Paths outside any episode directory are ignored.
    pub fn episode_numbers<P: AsRef<Path>>(&self, present: &[P]) -> (Vec<u32>, Vec<Violation>) {
        let mut numbers = Vec::new();
        let mut malformed = Vec::new();
        for path in present.iter().map(AsRef::as_ref) {
            if !is_episode_path(path) {
                continue;
            }
            match self.episode_number(path) {
                Some(number) => numbers.push(number),
                None => malformed.push(Violation::new(
                    ViolationKind::BadEpisodeFilename,
                    None,
                    format!("Episode {} has badly-formatted filename", path.display()),
                )),
            }
        }
        (numbers, malformed)
    }
}

/// Does any component of `path` name the episode directory?
pub fn is_episode_path(path: &Path) -> bool {
    path.components()
        .any(|component| component.as_os_str() == EPISODE_DIR)
}

/// Duplicate and consecutiveness checks over collected episode numbers.
///
/// Duplicates produce one violation listing the full sorted numbers and
/// the distinct sorted numbers. Any adjacent pair in the full sorted list
/// that does not differ by exactly one produces a single aggregate
/// violation listing the full sorted numbers; a duplicated number is such
/// a pair.
pub fn check_numbering(numbers: &[u32]) -> Vec<Violation> {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    let mut distinct = sorted.clone();
    distinct.dedup();

    let mut violations = Vec::new();
    if sorted.len() != distinct.len() {
        violations.push(Violation::new(
            ViolationKind::DuplicateEpisodeNumber,
            None,
            format!(
                "Duplicate episode numbers {} vs {}",
                format_numbers(&sorted),
                format_numbers(&distinct)
            ),
        ));
    }

    let consecutive = sorted.windows(2).all(|pair| pair[1] == pair[0] + 1);
    if !consecutive {
        violations.push(Violation::new(
            ViolationKind::NonConsecutiveEpisodes,
            None,
            format!(
                "Missing or non-consecutive episode numbers {}",
                format_numbers(&sorted)
            ),
        ));
    }
    violations
}

/// `[01, 02, 04]`
fn format_numbers(numbers: &[u32]) -> String {
    let items: Vec<String> = numbers.iter().map(|n| format!("{n:02}")).collect();
    format!("[{}]", items.join(", "))
}

/// Resolved catalogue paths for `source_root`, in catalogue order.
pub fn required_paths(source_root: &Path) -> Vec<PathBuf> {
    REQUIRED_FILES
        .iter()
        .map(|file| file.resolve(source_root))
        .collect()
}
