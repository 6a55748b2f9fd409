#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Files that only declare submodules or a binary entry point
    fn is_wiring_file(path: &str) -> bool {
        path == "lib.rs" || path == "main.rs" || path.ends_with("mod.rs")
    }

    /// Every `.rs` file and directory under `dir`, relative to `base`
    fn walk(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_error| io::Error::other("path escaped its base directory"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                found.insert(relative);
                walk(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let mut found = BTreeSet::new();
        if let Err(error) = walk(root, root, &mut found) {
            assert!(!root.exists(), "failed to scan {}: {error}", root.display());
        }
        found
    }

    fn report(header: &str, entries: &[String]) -> String {
        format!("{header}:\n  - {}", entries.join("\n  - "))
    }

    #[test]
    fn test_every_source_file_has_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|path| !is_wiring_file(path) && !tests.contains(path))
            .map(|path| format!("src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without a unit test counterpart", &missing)
        );
    }

    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|path| !is_wiring_file(path) && !sources.contains(path))
            .map(|path| format!("tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit test files with no source counterpart", &orphaned)
        );
    }

    #[test]
    fn test_every_test_file_contains_tests() {
        let mut files: Vec<PathBuf> = Vec::new();
        for root in ["tests", "benches"] {
            files.extend(
                tree(root)
                    .into_iter()
                    .filter(|path| path.ends_with(".rs"))
                    .filter(|path| {
                        let name = path.rsplit('/').next().unwrap_or(path);
                        name != "main.rs" && name != "mod.rs"
                    })
                    .map(|path| Path::new(root).join(path)),
            );
        }

        let empty: Vec<String> = files
            .iter()
            .filter(|path| {
                let content = fs::read_to_string(path).unwrap_or_default();
                let marker = if path.starts_with("benches") {
                    "criterion_main!"
                } else {
                    "#[test]"
                };
                !content.contains(marker)
            })
            .map(|path| path.display().to_string())
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test or bench files without any test or bench entry", &empty)
        );
    }

    // Each bench target named in the manifest must exist on disk
    #[test]
    fn test_declared_benches_exist() {
        let manifest = fs::read_to_string("Cargo.toml").unwrap_or_default();
        let mut in_bench = false;
        let mut missing = Vec::new();

        for line in manifest.lines().map(str::trim) {
            if line.starts_with('[') {
                in_bench = line == "[[bench]]";
                continue;
            }
            if !in_bench {
                continue;
            }
            if let Some(name) = line
                .strip_prefix("name = \"")
                .and_then(|rest| rest.strip_suffix('"'))
            {
                let path = format!("benches/{name}.rs");
                if !Path::new(&path).exists() {
                    missing.push(path);
                }
            }
        }

        assert!(
            missing.is_empty(),
            "{}",
            report("Bench targets declared without a source file", &missing)
        );
    }
}
