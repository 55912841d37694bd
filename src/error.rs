use std::io;
use thiserror::Error;

/// 通知ダイアログの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// リネーム処理のエラー
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("開始番号は数字で入力してください！（入力値: {value:?}）")]
    Format { value: String },

    #[error("有効なフォルダを選択してください！（{folder}）")]
    Path { folder: String },

    #[error("少なくとも1つのPDFファイルを選択してください。")]
    EmptySelection,

    /// 途中で衝突した場合、それまでのリネームは適用済みのまま残る
    #[error("{name} は既に存在します！（{renamed} 件は変更済み）")]
    Collision { name: String, renamed: usize },

    #[error("{name} の名前を変更できませんでした: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl RenameError {
    pub fn severity(&self) -> Severity {
        match self {
            RenameError::EmptySelection => Severity::Info,
            _ => Severity::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity() {
            Severity::Info => "通知",
            Severity::Warning => "警告",
            Severity::Error => "エラー",
        }
    }
}

/// 元に戻す処理のエラー
#[derive(Debug, Error)]
pub enum UndoError {
    #[error("元に戻す操作がありません。")]
    NothingToUndo,

    #[error("一部のファイルを元に戻せませんでした: {failed:?}")]
    Restore { restored: usize, failed: Vec<String> },
}

impl UndoError {
    pub fn severity(&self) -> Severity {
        match self {
            UndoError::NothingToUndo => Severity::Info,
            UndoError::Restore { .. } => Severity::Warning,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity() {
            Severity::Info => "通知",
            Severity::Warning => "警告",
            Severity::Error => "エラー",
        }
    }
}
