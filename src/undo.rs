use crate::error::UndoError;
use crate::rename::RenameHistory;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoReport {
    pub restored: usize,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 直近のリネームを逆順に戻す。
///
/// 変更後のパスにファイルが無い、元の名前が既に使われている、
/// rename 自体が失敗した場合はそのファイルを失敗として記録し、残りは続行する。
/// 結果にかかわらず履歴は空になる。
pub fn undo_last_batch(history: &mut RenameHistory) -> Result<UndoReport, UndoError> {
    if history.is_empty() {
        return Err(UndoError::NothingToUndo);
    }

    let records = history.take();
    let mut restored = 0usize;
    let mut failed = Vec::new();

    for record in records.iter().rev() {
        if !record.new_path.exists() {
            debug!(path = %record.new_path.display(), "renamed file is gone");
            failed.push(display_name(&record.new_path));
            continue;
        }
        if record.old_path.exists() {
            warn!(path = %record.old_path.display(), "original name is taken, not overwriting");
            failed.push(display_name(&record.new_path));
            continue;
        }
        match std::fs::rename(&record.new_path, &record.old_path) {
            Ok(()) => restored += 1,
            Err(e) => {
                warn!(path = %record.new_path.display(), error = %e, "restore failed");
                failed.push(display_name(&record.new_path));
            }
        }
    }

    // 逆順で処理したので、報告は履歴の順に揃える
    failed.reverse();

    if failed.is_empty() {
        info!(restored, "undo completed");
        Ok(UndoReport { restored })
    } else {
        warn!(restored, failed = ?failed, "undo partially failed");
        Err(UndoError::Restore { restored, failed })
    }
}
