//! Scratch area for generated harnesses and binaries.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Create the scratch directory if it is missing. Existing directories are left alone.
pub fn ensure_output_area(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Path to write in the harness `#include`, relative to the scratch directory.
///
/// Both paths are resolved first so `./tests` and `tests` agree. When no common root exists (different
/// Windows drives) the resolved source path is used as is. Separators are always `/`.
pub fn include_path_for(scratch_dir: &Path, source: &Path) -> String {
    let base = resolve(scratch_dir);
    let target = resolve(source);
    relative_to(&base, &target).to_string_lossy().replace('\\', "/")
}

fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target_components: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(&target_components)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return target.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
