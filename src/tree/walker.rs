//! DocWalker - builds the page plan for a script tree

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::header::extract_file_header;
use crate::language::{Language, resolve};
use crate::output::module_path;

use super::config::DocConfig;
use super::filter::GitignoreFilter;
use super::node::DocNode;
use super::utils::{is_excluded_dir, page_stem, should_ignore_path};

/// Walks a source tree and plans one page per script and per directory.
///
/// Headers are extracted in parallel once the tree has been scanned.
pub struct DocWalker {
    config: DocConfig,
}

/// Per-walk state shared by the recursive scan.
struct Scan {
    filter: Option<GitignoreFilter>,
    excluded: Vec<PathBuf>,
    package_root: PathBuf,
    /// Scripts whose header still has to be extracted
    pending: Vec<PathBuf>,
}

impl DocWalker {
    pub fn new(config: DocConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    /// Plan the pages for the tree rooted at `root`.
    ///
    /// Files that cannot be classified are skipped quietly; files that
    /// cannot be read are skipped with a warning. The root directory is
    /// always part of the plan, even when empty.
    pub fn walk(&self, root: &Path) -> Result<DocNode> {
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize().map_err(|e| Error::io(root, e))?;

        let title = self.config.title.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "scripts".to_string())
        });

        let package_root = match &self.config.package_root {
            Some(dir) => dir.canonicalize().map_err(|e| Error::io(dir, e))?,
            None => root.parent().unwrap_or(&root).to_path_buf(),
        };

        let mut scan = Scan {
            filter: if self.config.show_all {
                None
            } else {
                GitignoreFilter::new(&root)
            },
            excluded: self.excluded_dirs(),
            package_root,
            pending: Vec::new(),
        };

        let mut tree = self.scan_dir(&root, title, Path::new(""), 0, &mut scan);

        let headers = extract_headers(&scan.pending, self.config.parallel_workers);
        let mut headers: HashMap<PathBuf, Result<String>> =
            scan.pending.into_iter().zip(headers).collect();
        attach_headers(&mut tree, &mut headers);

        let (dirs, files) = tree.count_pages();
        info!("planned {} index pages and {} script pages", dirs, files);
        Ok(tree)
    }

    fn excluded_dirs(&self) -> Vec<PathBuf> {
        self.config
            .exclude_dirs
            .iter()
            .chain(std::iter::once(&self.config.output_dir))
            .filter_map(|dir| dir.canonicalize().ok())
            .collect()
    }

    /// Scan one directory. `page_dir` is where its index page goes, relative
    /// to the output root; its children go under `page_dir/<title>/`.
    fn scan_dir(
        &self,
        path: &Path,
        title: String,
        page_dir: &Path,
        depth: usize,
        scan: &mut Scan,
    ) -> DocNode {
        let page = page_dir.join(format!("{}.rst", title));
        let child_dir = page_dir.join(&title);
        let mut children = Vec::new();

        let at_max_depth = self.config.max_depth.is_some_and(|max| depth >= max);
        if at_max_depth {
            return DocNode::Dir {
                name: title,
                source: path.to_path_buf(),
                page,
                children,
            };
        }

        let entries = match std::fs::read_dir(path) {
            Ok(e) => e,
            Err(err) => {
                warn!("cannot read directory {}: {}", path.display(), err);
                return DocNode::Dir {
                    name: title,
                    source: path.to_path_buf(),
                    page,
                    children,
                };
            }
        };

        let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let entry_path = entry.path();

            // Skip symlinks to prevent loops
            if entry_path.is_symlink() {
                continue;
            }
            if should_ignore_path(
                &entry_path,
                &self.config.ignore_patterns,
                self.config.show_all,
            ) {
                continue;
            }

            let is_dir = entry_path.is_dir();
            if let Some(filter) = &scan.filter {
                if filter.is_ignored(&entry_path, is_dir) {
                    debug!("gitignored: {}", entry_path.display());
                    continue;
                }
            }

            let name = entry.file_name().to_string_lossy().to_string();

            if is_dir {
                if is_excluded_dir(&entry_path, &scan.excluded) {
                    debug!("excluded directory: {}", entry_path.display());
                    continue;
                }
                let node = self.scan_dir(&entry_path, name, &child_dir, depth + 1, scan);
                // Prune directories without any documented script
                if let DocNode::Dir { children: ref c, .. } = node {
                    if c.is_empty() {
                        continue;
                    }
                }
                children.push(node);
            } else if entry_path.is_file() {
                if let Some(node) = self.plan_file(&entry_path, name, &child_dir, scan) {
                    children.push(node);
                }
            }
        }

        resolve_page_collisions(&mut children);
        DocNode::Dir {
            name: title,
            source: path.to_path_buf(),
            page,
            children,
        }
    }

    fn plan_file(
        &self,
        path: &Path,
        name: String,
        page_dir: &Path,
        scan: &mut Scan,
    ) -> Option<DocNode> {
        let language = match resolve(path) {
            Ok(language) => language,
            Err(err) => {
                debug!("skipping {}", err);
                return None;
            }
        };

        let page = page_dir.join(format!("{}.rst", page_stem(&name)));
        let module = if language == Language::Python {
            Some(module_path(path, &scan.package_root))
        } else {
            scan.pending.push(path.to_path_buf());
            None
        };

        Some(DocNode::File {
            name,
            source: path.to_path_buf(),
            page,
            language,
            header: None,
            module,
        })
    }
}

/// Give script pages that clash with a sibling's page a numeric suffix.
///
/// `clean.do` and a directory `clean_do` both map to `clean_do.rst`; the
/// directory keeps the name since its children live under it.
fn resolve_page_collisions(children: &mut [DocNode]) {
    let mut taken: HashSet<PathBuf> = children
        .iter()
        .filter(|child| child.is_dir())
        .map(|child| child.page().to_path_buf())
        .collect();

    for child in children.iter_mut() {
        let DocNode::File { name, page, .. } = child else {
            continue;
        };
        if taken.insert(page.clone()) {
            continue;
        }

        let stem = page
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let renamed = (2..)
            .map(|n| page.with_file_name(format!("{}_{}.rst", stem, n)))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| page.clone());
        warn!(
            "page {} for {} is already used, writing {} instead",
            page.display(),
            name,
            renamed.display()
        );
        taken.insert(renamed.clone());
        *page = renamed;
    }
}

/// Extract headers for `paths`, in parallel unless `workers` is 1.
fn extract_headers(paths: &[PathBuf], workers: usize) -> Vec<Result<String>> {
    let extract_all = || -> Vec<Result<String>> {
        paths
            .par_iter()
            .map(|path| extract_file_header(path))
            .collect()
    };

    match workers {
        1 => paths.iter().map(|path| extract_file_header(path)).collect(),
        // Auto-detect: use rayon's default thread pool
        0 => extract_all(),
        n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(extract_all),
            Err(err) => {
                // Fall back to rayon's global pool if custom pool creation fails
                debug!("cannot build a pool of {} workers: {}", n, err);
                extract_all()
            }
        },
    }
}

/// Fill in extracted headers, dropping scripts that could not be read and
/// any directory left without scripts.
fn attach_headers(node: &mut DocNode, headers: &mut HashMap<PathBuf, Result<String>>) {
    let DocNode::Dir { children, .. } = node else {
        return;
    };

    children.retain_mut(|child| match child {
        DocNode::File {
            source,
            header,
            module: None,
            ..
        } => match headers.remove(source.as_path()) {
            Some(Ok(text)) => {
                *header = Some(text);
                true
            }
            Some(Err(err)) if err.is_skippable() => {
                warn!("skipping {}", err);
                false
            }
            Some(Err(err)) => {
                warn!("cannot document {}: {}", source.display(), err);
                false
            }
            None => false,
        },
        DocNode::File { .. } => true,
        DocNode::Dir { .. } => {
            attach_headers(child, headers);
            matches!(child, DocNode::Dir { children, .. } if !children.is_empty())
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn child_names(node: &DocNode) -> Vec<String> {
        match node {
            DocNode::Dir { children, .. } => {
                children.iter().map(|c| c.name().to_string()).collect()
            }
            DocNode::File { .. } => Vec::new(),
        }
    }

    fn find<'a>(node: &'a DocNode, name: &str) -> Option<&'a DocNode> {
        match node {
            DocNode::Dir { children, .. } => children.iter().find_map(|c| {
                if c.name() == name {
                    Some(c)
                } else {
                    find(c, name)
                }
            }),
            DocNode::File { .. } => None,
        }
    }

    fn walker() -> DocWalker {
        DocWalker::new(DocConfig {
            parallel_workers: 1,
            ..Default::default()
        })
    }

    #[test]
    fn test_walk_plans_pages() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("analysis");
        write(&root, "clean.do", "* Clean the data\nuse raw");
        write(&root, "models/fit.jl", "#= Fit it =#\nusing CSV");
        write(&root, "README.md", "# not a script");

        let tree = walker().walk(&root).unwrap();
        assert_eq!(tree.name(), "analysis");
        assert_eq!(tree.page(), Path::new("analysis.rst"));
        assert_eq!(child_names(&tree), vec!["clean.do", "models"]);

        match find(&tree, "clean.do").unwrap() {
            DocNode::File {
                page,
                header,
                language,
                ..
            } => {
                assert_eq!(page, Path::new("analysis/clean_do.rst"));
                assert_eq!(header.as_deref(), Some("Clean the data"));
                assert_eq!(*language, Language::Stata);
            }
            other => panic!("expected file, got {:?}", other),
        }

        let models = find(&tree, "models").unwrap();
        assert_eq!(models.page(), Path::new("analysis/models.rst"));
        let fit = find(&tree, "fit.jl").unwrap();
        assert_eq!(fit.page(), Path::new("analysis/models/fit_jl.rst"));
    }

    #[test]
    fn test_python_files_get_module_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("pkg");
        write(&root, "io/read.py", "\"\"\"Reader\"\"\"");
        write(&root, "__init__.py", "");

        let tree = walker().walk(&root).unwrap();
        match find(&tree, "read.py").unwrap() {
            DocNode::File { module, header, .. } => {
                assert_eq!(module.as_deref(), Some("pkg.io.read"));
                assert!(header.is_none());
            }
            other => panic!("expected file, got {:?}", other),
        }
        match find(&tree, "__init__.py").unwrap() {
            DocNode::File { module, .. } => assert_eq!(module.as_deref(), Some("pkg")),
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_package_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/pkg");
        write(&root, "run.py", "");

        let tree = DocWalker::new(DocConfig {
            package_root: Some(dir.path().to_path_buf()),
            parallel_workers: 1,
            ..Default::default()
        })
        .walk(&root)
        .unwrap();
        match find(&tree, "run.py").unwrap() {
            DocNode::File { module, .. } => assert_eq!(module.as_deref(), Some("src.pkg.run")),
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_directories_pruned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        write(&root, "main.r", "# Main");
        write(&root, "data/raw.csv", "a,b");
        fs::create_dir_all(root.join("empty")).unwrap();

        let tree = walker().walk(&root).unwrap();
        assert_eq!(child_names(&tree), vec!["main.r"]);
    }

    #[test]
    fn test_empty_root_is_kept() {
        let dir = TempDir::new().unwrap();
        let tree = walker().walk(dir.path()).unwrap();
        assert!(tree.is_dir());
        assert!(child_names(&tree).is_empty());
    }

    #[test]
    fn test_title_override() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.m", "% doc");
        let tree = DocWalker::new(DocConfig {
            title: Some("Scripts".to_string()),
            ..Default::default()
        })
        .walk(dir.path())
        .unwrap();
        assert_eq!(tree.page(), Path::new("Scripts.rst"));
        assert_eq!(find(&tree, "a.m").unwrap().page(), Path::new("Scripts/a_m.rst"));
    }

    #[test]
    fn test_ignore_patterns_and_hidden() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "keep.r", "# keep");
        write(dir.path(), "scratch_test.r", "# scratch");
        write(dir.path(), ".hidden/secret.r", "# hidden");

        let tree = DocWalker::new(DocConfig {
            ignore_patterns: vec!["scratch*".to_string()],
            parallel_workers: 1,
            ..Default::default()
        })
        .walk(dir.path())
        .unwrap();
        assert_eq!(child_names(&tree), vec!["keep.r"]);

        let tree = DocWalker::new(DocConfig {
            show_all: true,
            parallel_workers: 1,
            ..Default::default()
        })
        .walk(dir.path())
        .unwrap();
        assert_eq!(
            child_names(&tree),
            vec![".hidden", "keep.r", "scratch_test.r"]
        );
    }

    #[test]
    fn test_gitignore_respected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".gitignore", "old/\n*.tmp.r\n");
        write(dir.path(), "main.do", "* main");
        write(dir.path(), "draft.tmp.r", "# draft");
        write(dir.path(), "old/legacy.do", "* legacy");

        let tree = walker().walk(dir.path()).unwrap();
        assert_eq!(child_names(&tree), vec!["main.do"]);
    }

    #[test]
    fn test_exclude_dirs_and_output_dir() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.do", "* main");
        write(dir.path(), "vendor/lib.r", "# vendored");
        write(dir.path(), "docs/generated.r", "# would loop");

        let tree = DocWalker::new(DocConfig {
            exclude_dirs: vec![dir.path().join("vendor")],
            output_dir: dir.path().join("docs"),
            parallel_workers: 1,
            ..Default::default()
        })
        .walk(dir.path())
        .unwrap();
        assert_eq!(child_names(&tree), vec!["main.do"]);
    }

    #[test]
    fn test_max_depth() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "top.r", "# top");
        write(dir.path(), "level1/mid.r", "# mid");

        let tree = DocWalker::new(DocConfig {
            max_depth: Some(1),
            parallel_workers: 1,
            ..Default::default()
        })
        .walk(dir.path())
        .unwrap();
        assert_eq!(child_names(&tree), vec!["top.r"]);
    }

    #[test]
    fn test_unreadable_script_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.r", "# good");
        fs::write(dir.path().join("bad.r"), [0xFF, 0xFE, 0x00]).unwrap();

        let tree = walker().walk(dir.path()).unwrap();
        assert_eq!(child_names(&tree), vec!["good.r"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = TempDir::new().unwrap();
        for i in 0..20 {
            write(dir.path(), &format!("s{:02}.do", i), &format!("* script {}\n", i));
        }

        let sequential = walker().walk(dir.path()).unwrap();
        for workers in [0, 4] {
            let parallel = DocWalker::new(DocConfig {
                parallel_workers: workers,
                ..Default::default()
            })
            .walk(dir.path())
            .unwrap();
            assert_eq!(
                serde_json::to_value(&parallel).unwrap(),
                serde_json::to_value(&sequential).unwrap()
            );
        }
    }

    #[test]
    fn test_script_and_directory_page_collision() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        write(&root, "clean.do", "* script");
        write(&root, "clean_do/inner.r", "# inner");

        let tree = walker().walk(&root).unwrap();
        assert_eq!(child_names(&tree), vec!["clean.do", "clean_do"]);
        assert_eq!(
            find(&tree, "clean.do").unwrap().page(),
            Path::new("proj/clean_do_2.rst")
        );
        assert_eq!(
            find(&tree, "clean_do").unwrap().page(),
            Path::new("proj/clean_do.rst")
        );
        assert_eq!(
            find(&tree, "inner.r").unwrap().page(),
            Path::new("proj/clean_do/inner_r.rst")
        );
    }

    #[test]
    fn test_walk_rejects_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.r", "");
        let err = walker().walk(&dir.path().join("a.r")).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { .. }));
    }
}
