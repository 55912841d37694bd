use crate::natsort::sort_naturally;
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;
use walkdir::WalkDir;

fn pdf_matcher() -> &'static GlobMatcher {
    static MATCHER: OnceLock<GlobMatcher> = OnceLock::new();
    MATCHER.get_or_init(|| {
        GlobBuilder::new("*.pdf")
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .expect("static glob")
            .compile_matcher()
    })
}

/// 拡張子が .pdf（大文字小文字を区別しない）かどうか
pub fn is_pdf_name(name: &str) -> bool {
    pdf_matcher().is_match(name)
}

/// フォルダ直下の PDF ファイル名を自然順で返す。
///
/// フォルダが存在しない場合は `None`。サブフォルダには潜らない。
pub fn list_pdfs(folder: &Path) -> Option<Vec<String>> {
    if !folder.is_dir() {
        debug!(folder = %folder.display(), "list_pdfs: not a directory");
        return None;
    }

    let mut names: Vec<String> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| match e.file_name().to_str() {
            Some(name) => Some(name.to_string()),
            None => {
                debug!(path = %e.path().display(), "skipping non UTF-8 file name");
                None
            }
        })
        .filter(|name| is_pdf_name(name))
        .collect();

    sort_naturally(&mut names);
    debug!(folder = %folder.display(), count = names.len(), "listed pdfs");
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"%PDF-1.4").unwrap();
    }

    #[test]
    fn lists_only_pdf_files_in_natural_order() {
        let temp = TempDir::new().unwrap();
        for name in ["p10.pdf", "p2.PDF", "notes.txt", "p1.pdf", "pdf"] {
            touch(temp.path(), name);
        }
        fs::create_dir(temp.path().join("nested.pdf")).unwrap();
        touch(&temp.path().join("nested.pdf"), "inner.pdf");

        let names = list_pdfs(temp.path()).unwrap();
        assert_eq!(names, vec!["p1.pdf", "p2.PDF", "p10.pdf"]);
    }

    #[test]
    fn relisting_is_idempotent() {
        let temp = TempDir::new().unwrap();
        for name in ["b3.pdf", "B20.pdf", "a.pdf", "b1.pdf"] {
            touch(temp.path(), name);
        }
        let first = list_pdfs(temp.path()).unwrap();
        let second = list_pdfs(temp.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a.pdf", "b1.pdf", "b3.pdf", "B20.pdf"]);
    }

    #[test]
    fn missing_folder_yields_none() {
        let temp = TempDir::new().unwrap();
        assert!(list_pdfs(&temp.path().join("missing")).is_none());
    }

    #[test]
    fn matches_extension_case_insensitively() {
        assert!(is_pdf_name("a.pdf"));
        assert!(is_pdf_name("A.Pdf"));
        assert!(!is_pdf_name("a.pdf.txt"));
        assert!(!is_pdf_name("apdf"));
    }
}
