use std::path::{Path, PathBuf};

const FONT_ROOTS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

fn font_file_count(dir: &Path) -> usize {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return 0;
    };
    rd.flatten()
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"))
        })
        .count()
}

fn collect_dirs(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    out.push(dir.to_path_buf());
    if depth == 0 {
        return;
    }
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_dirs(&path, depth - 1, out);
        }
    }
}

/// Installed directory holding the most `.ttf`/`.otf` files directly, if any.
pub(crate) fn font_dir() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    for root in FONT_ROOTS {
        collect_dirs(Path::new(root), 4, &mut dirs);
    }
    dirs.into_iter()
        .map(|d| (font_file_count(&d), d))
        .filter(|(n, _)| *n > 0)
        .max_by_key(|(n, _)| *n)
        .map(|(_, d)| d)
}
