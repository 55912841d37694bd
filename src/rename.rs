use crate::error::RenameError;
use crate::natsort::to_ascii_digits;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 連番の桁数
pub const DEFAULT_DIGITS: usize = 6;

/// `{part1}-{連番}-{part3}-{part4}.pdf` の命名テンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
    pub part1: String,
    pub part3: String,
    pub part4: String,
    pub digits: usize,
}

impl NamingTemplate {
    /// 各パートは前後の空白を除いて使う
    pub fn new(part1: &str, part3: &str, part4: &str) -> Self {
        Self {
            part1: part1.trim().to_string(),
            part3: part3.trim().to_string(),
            part4: part4.trim().to_string(),
            digits: DEFAULT_DIGITS,
        }
    }

    pub fn file_name(&self, number: i64) -> String {
        format!(
            "{}-{:0width$}-{}-{}.pdf",
            self.part1,
            number,
            self.part3,
            self.part4,
            width = self.digits
        )
    }
}

/// 開始番号を整数として読む。全角の数字・符号も受け付ける
pub fn parse_start_number(raw: &str) -> Result<i64, RenameError> {
    let normalized: String = to_ascii_digits(raw.trim())
        .chars()
        .map(|c| match c {
            '＋' => '+',
            '－' => '-',
            _ => c,
        })
        .collect();
    normalized.parse::<i64>().map_err(|_| RenameError::Format {
        value: raw.to_string(),
    })
}

/// 1件分のリネーム記録（新パス → 旧パス）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub new_path: PathBuf,
    pub old_path: PathBuf,
}

/// 直近1回分のリネーム履歴。元に戻すは1段のみ
#[derive(Debug, Default)]
pub struct RenameHistory {
    records: Vec<RenameRecord>,
}

impl RenameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[RenameRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push(&mut self, new_path: PathBuf, old_path: PathBuf) {
        self.records.push(RenameRecord { new_path, old_path });
    }

    pub(crate) fn take(&mut self) -> Vec<RenameRecord> {
        std::mem::take(&mut self.records)
    }
}

/// リネーム1回分の入力
#[derive(Debug, Clone, Copy)]
pub struct RenameRequest<'a> {
    pub folder: &'a Path,
    pub template: &'a NamingTemplate,
    pub start_number: &'a str,
    /// 一覧上の index を番号を振る順に並べたもの
    pub order: &'a [usize],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: usize,
    /// 次回の開始番号（開始番号 + 変更件数）
    pub next_start: i64,
}

/// 選択順にリネームを実行する。
///
/// 検証（開始番号 → フォルダ → 選択の有無）に失敗した場合はファイルに一切触れない。
/// 途中で衝突・I/O エラーが起きた場合はそこで止まり、それまでの変更は残る。
/// `listing` の該当要素は変更後の名前に置き換える。
pub fn rename_batch(
    request: &RenameRequest<'_>,
    listing: &mut [String],
    history: &mut RenameHistory,
) -> Result<RenameReport, RenameError> {
    let start = parse_start_number(request.start_number)?;

    if !request.folder.is_dir() {
        return Err(RenameError::Path {
            folder: request.folder.display().to_string(),
        });
    }

    let order: Vec<usize> = request
        .order
        .iter()
        .copied()
        .filter(|&i| i < listing.len())
        .collect();
    if order.is_empty() {
        return Err(RenameError::EmptySelection);
    }

    history.clear();

    for (offset, &idx) in order.iter().enumerate() {
        let number = start
            .checked_add(offset as i64)
            .ok_or_else(|| RenameError::Format {
                value: request.start_number.to_string(),
            })?;
        let new_name = request.template.file_name(number);
        let old_path = request.folder.join(&listing[idx]);
        let new_path = request.folder.join(&new_name);

        if new_path.exists() {
            warn!(name = %new_name, renamed = offset, "rename collision");
            return Err(RenameError::Collision {
                name: new_name,
                renamed: offset,
            });
        }

        if let Err(source) = std::fs::rename(&old_path, &new_path) {
            error!(from = %old_path.display(), to = %new_path.display(), %source, "rename failed");
            return Err(RenameError::Io {
                name: listing[idx].clone(),
                source,
            });
        }
        debug!(from = %listing[idx], to = %new_name, "renamed");

        history.push(new_path, old_path);
        listing[idx] = new_name;
    }

    let renamed = order.len();
    info!(renamed, start, "rename batch completed");
    Ok(RenameReport {
        renamed,
        next_start: start.saturating_add(renamed as i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &[&str]) -> (TempDir, Vec<String>) {
        let temp = TempDir::new().unwrap();
        for name in names {
            fs::write(temp.path().join(name), name.as_bytes()).unwrap();
        }
        (temp, names.iter().map(|s| s.to_string()).collect())
    }

    fn template() -> NamingTemplate {
        NamingTemplate::new("A", "x", "y")
    }

    #[test]
    fn file_name_pads_the_counter() {
        assert_eq!(template().file_name(5), "A-000005-x-y.pdf");
        assert_eq!(template().file_name(1234567), "A-1234567-x-y.pdf");
        assert_eq!(template().file_name(-5), "A--00005-x-y.pdf");
        assert_eq!(
            NamingTemplate::new(" 3301 ", "A0", "N0").file_name(100011),
            "3301-100011-A0-N0.pdf"
        );
    }

    #[test]
    fn start_number_parsing() {
        assert_eq!(parse_start_number(" 42 ").unwrap(), 42);
        assert_eq!(parse_start_number("１０００１１").unwrap(), 100011);
        assert_eq!(parse_start_number("－５").unwrap(), -5);
        assert_eq!(parse_start_number("　１２　").unwrap(), 12);
        assert!(matches!(
            parse_start_number("abc"),
            Err(RenameError::Format { .. })
        ));
    }

    #[test]
    fn renames_in_effective_order_and_advances_counter() {
        let (temp, mut listing) = setup(&["a.pdf", "b.pdf", "c.pdf"]);
        let mut history = RenameHistory::new();
        let tpl = template();
        let request = RenameRequest {
            folder: temp.path(),
            template: &tpl,
            start_number: "5",
            order: &[2, 0],
        };

        let report = rename_batch(&request, &mut listing, &mut history).unwrap();
        assert_eq!(report, RenameReport { renamed: 2, next_start: 7 });
        assert_eq!(listing, vec!["A-000006-x-y.pdf", "b.pdf", "A-000005-x-y.pdf"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("A-000005-x-y.pdf")).unwrap(),
            "c.pdf"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("A-000006-x-y.pdf")).unwrap(),
            "a.pdf"
        );
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].old_path, temp.path().join("c.pdf"));
        assert_eq!(history.records()[0].new_path, temp.path().join("A-000005-x-y.pdf"));
    }

    #[test]
    fn invalid_start_number_touches_nothing() {
        let (temp, mut listing) = setup(&["a.pdf"]);
        let mut history = RenameHistory::new();
        history.push(temp.path().join("n"), temp.path().join("o"));
        let tpl = template();
        let request = RenameRequest {
            folder: temp.path(),
            template: &tpl,
            start_number: "abc",
            order: &[0],
        };

        let err = rename_batch(&request, &mut listing, &mut history).unwrap_err();
        assert!(matches!(err, RenameError::Format { .. }));
        assert!(temp.path().join("a.pdf").exists());
        assert_eq!(listing, vec!["a.pdf"]);
        // 前回の履歴はそのまま残る
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn missing_folder_is_a_path_error() {
        let temp = TempDir::new().unwrap();
        let mut listing = vec!["a.pdf".to_string()];
        let mut history = RenameHistory::new();
        let tpl = template();
        let missing = temp.path().join("gone");
        let request = RenameRequest {
            folder: &missing,
            template: &tpl,
            start_number: "1",
            order: &[0],
        };
        assert!(matches!(
            rename_batch(&request, &mut listing, &mut history),
            Err(RenameError::Path { .. })
        ));
    }

    #[test]
    fn empty_order_is_reported() {
        let (temp, mut listing) = setup(&["a.pdf"]);
        let mut history = RenameHistory::new();
        let tpl = template();
        let request = RenameRequest {
            folder: temp.path(),
            template: &tpl,
            start_number: "1",
            order: &[],
        };
        let err = rename_batch(&request, &mut listing, &mut history).unwrap_err();
        assert!(matches!(err, RenameError::EmptySelection));
        assert!(temp.path().join("a.pdf").exists());
    }

    #[test]
    fn collision_stops_batch_and_keeps_prior_renames() {
        let (temp, mut listing) = setup(&["a.pdf", "b.pdf", "A-000006-x-y.pdf"]);
        let mut history = RenameHistory::new();
        let tpl = template();
        let request = RenameRequest {
            folder: temp.path(),
            template: &tpl,
            start_number: "5",
            order: &[0, 1],
        };

        let err = rename_batch(&request, &mut listing, &mut history).unwrap_err();
        match err {
            RenameError::Collision { name, renamed } => {
                assert_eq!(name, "A-000006-x-y.pdf");
                assert_eq!(renamed, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(temp.path().join("A-000005-x-y.pdf").exists());
        assert!(!temp.path().join("a.pdf").exists());
        assert!(temp.path().join("b.pdf").exists());
        assert_eq!(listing[0], "A-000005-x-y.pdf");
        assert_eq!(listing[1], "b.pdf");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn missing_source_file_is_an_io_error() {
        let (temp, mut listing) = setup(&["a.pdf", "b.pdf"]);
        fs::remove_file(temp.path().join("b.pdf")).unwrap();
        let mut history = RenameHistory::new();
        let tpl = template();
        let request = RenameRequest {
            folder: temp.path(),
            template: &tpl,
            start_number: "1",
            order: &[0, 1],
        };

        let err = rename_batch(&request, &mut listing, &mut history).unwrap_err();
        assert!(matches!(err, RenameError::Io { ref name, .. } if name == "b.pdf"));
        assert!(temp.path().join("A-000001-x-y.pdf").exists());
        assert_eq!(history.len(), 1);
    }
}
