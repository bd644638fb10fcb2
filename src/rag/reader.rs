//! Loading documents from files and directories.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::document::Document;
use super::error::RagError;

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "rst", "csv", "json"];

/// Reads files into [`Document`]s.
///
/// Explicit files must exist and have a supported extension. When reading a
/// directory, unsupported files are skipped instead.
#[derive(Debug, Clone)]
pub struct DocumentReader {
    source: Source,
    recursive: bool,
}

#[derive(Debug, Clone)]
enum Source {
    Files(Vec<PathBuf>),
    Dir(PathBuf),
}

impl DocumentReader {
    /// Reads exactly the given files.
    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            source: Source::Files(paths.into_iter().map(Into::into).collect()),
            recursive: false,
        }
    }

    /// Reads every supported file in `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Dir(dir.into()),
            recursive: false,
        }
    }

    /// Descend into subdirectories when reading a directory.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Picks [`from_dir`](Self::from_dir) or [`from_files`](Self::from_files)
    /// depending on what `path` points at.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_files([path])
        }
    }

    pub fn load_data(&self) -> Result<Vec<Document>, RagError> {
        match &self.source {
            Source::Files(paths) => {
                let mut documents = Vec::with_capacity(paths.len());
                for path in paths {
                    if !path.exists() {
                        return Err(RagError::PathNotFound(path.clone()));
                    }
                    documents.push(load_file(path)?);
                }
                if documents.is_empty() {
                    return Err(RagError::NoDocuments("an empty file list".into()));
                }
                Ok(documents)
            }
            Source::Dir(dir) => {
                if !dir.is_dir() {
                    return Err(RagError::PathNotFound(dir.clone()));
                }
                let mut documents = Vec::new();
                self.load_dir(dir, &mut documents)?;
                if documents.is_empty() {
                    return Err(RagError::NoDocuments(dir.display().to_string()));
                }
                Ok(documents)
            }
        }
    }

    fn load_dir(&self, dir: &Path, out: &mut Vec<Document>) -> Result<(), RagError> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    log::warn!("skipping symlink loop: {err}");
                    continue;
                }
                Err(err) => return Err(RagError::Io(err.into())),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match load_file(entry.path()) {
                Ok(doc) => out.push(doc),
                Err(RagError::UnsupportedFormat { path, extension }) => {
                    log::debug!("skipping {} (unsupported '{extension}')", path.display());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn load_file(path: &Path) -> Result<Document, RagError> {
    let extension = extension_of(path);
    let text = if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        fs::read_to_string(path)?
    } else if extension == "pdf" {
        read_pdf(path)?
    } else {
        return Err(RagError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    };

    let size = fs::metadata(path)?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_path = path.display().to_string();
    log::debug!("loaded {file_path} ({size} bytes, {} chars)", text.chars().count());

    Ok(Document::new(file_path.clone(), text)
        .with_metadata("file_path", file_path)
        .with_metadata("file_name", file_name)
        .with_metadata("file_type", mime_for(&extension))
        .with_metadata("file_size", size))
}

fn mime_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        _ => "text/plain",
    }
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<String, RagError> {
    pdf_extract::extract_text(path).map_err(|e| RagError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<String, RagError> {
    Err(RagError::MissingParser {
        format: "PDF",
        feature: "pdf",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_text_file_with_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.md", "# Faithfulness\nChecks grounding.");

        let docs = DocumentReader::from_files([&path]).load_data().unwrap();

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert!(doc.text.contains("Checks grounding."));
        assert_eq!(doc.metadata["file_name"], "notes.md");
        assert_eq!(doc.metadata["file_type"], "text/markdown");
        assert_eq!(doc.metadata["file_size"], 32);
        assert_eq!(doc.id, path.display().to_string());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = DocumentReader::from_files(["data/does-not-exist.txt"])
            .load_data()
            .unwrap_err();
        assert!(matches!(err, RagError::PathNotFound(_)));
    }

    #[test]
    fn explicit_unsupported_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "deck.pptx", "binary");
        let err = DocumentReader::from_files([path]).load_data().unwrap_err();
        assert!(matches!(err, RagError::UnsupportedFormat { ref extension, .. } if extension == "pptx"));
    }

    #[test]
    fn directory_skips_unsupported_and_hidden_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", "second");
        write(&dir, "a.txt", "first");
        write(&dir, "image.png", "png");
        write(&dir, ".secret.txt", "hidden");

        let docs = DocumentReader::from_dir(dir.path()).load_data().unwrap();
        let texts: Vec<_> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn recursion_is_opt_in() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir, "nested/inner.txt", "inner");
        write(&dir, "outer.txt", "outer");

        let flat = DocumentReader::from_dir(dir.path()).load_data().unwrap();
        assert_eq!(flat.len(), 1);

        let deep = DocumentReader::from_dir(dir.path())
            .recursive(true)
            .load_data()
            .unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn hidden_directories_are_not_entered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        write(&dir, ".git/HEAD.txt", "secret");
        write(&dir, "a.txt", "first");

        let docs = DocumentReader::from_dir(dir.path())
            .recursive(true)
            .load_data()
            .unwrap();
        let texts: Vec<_> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["first"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_loads_each_file_once() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.txt", "first");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let docs = DocumentReader::from_dir(dir.path())
            .recursive(true)
            .load_data()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "first");
    }

    #[test]
    fn empty_directory_has_no_documents() {
        let dir = TempDir::new().unwrap();
        let err = DocumentReader::from_dir(dir.path()).load_data().unwrap_err();
        assert!(matches!(err, RagError::NoDocuments(_)));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_without_feature_reports_missing_parser() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sample.pdf", "%PDF-1.4");
        let err = DocumentReader::for_path(path).load_data().unwrap_err();
        assert!(matches!(err, RagError::MissingParser { .. }));
    }
}
