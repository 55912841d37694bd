use druid::im::Vector;
use druid::{Data, Lens};
use std::path::Path;

// 命名テンプレートの初期値
pub const DEFAULT_PART1: &str = "3301";
pub const DEFAULT_START_NUMBER: &str = "100011";
pub const DEFAULT_PART3: &str = "A0";
pub const DEFAULT_PART4: &str = "N0";

/// 一覧の1行（ファイル名・フルパス・選択状態）
#[derive(Clone, Data, Lens)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub selected: bool,
}

/// ステータス行の表示色の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Data)]
pub enum StatusKind {
    Neutral,
    Renamed,
    Undone,
    Failed,
}

/// アプリ全体の状態
#[derive(Clone, Data, Lens)]
pub struct AppState {
    pub folder: String,
    pub files: Vector<FileEntry>,
    pub part1: String,
    pub start_number: String,
    pub part3: String,
    pub part4: String,
    pub status_message: String,
    pub status_kind: StatusKind,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            folder: "".to_string(),
            files: Vector::new(),
            part1: DEFAULT_PART1.to_string(),
            start_number: DEFAULT_START_NUMBER.to_string(),
            part3: DEFAULT_PART3.to_string(),
            part4: DEFAULT_PART4.to_string(),
            status_message: "準備完了".to_string(),
            status_kind: StatusKind::Neutral,
        }
    }

    fn entry(&self, name: String) -> FileEntry {
        let path = Path::new(&self.folder).join(&name);
        FileEntry {
            name,
            path: path.to_string_lossy().to_string(),
            selected: false,
        }
    }

    /// 一覧を丸ごと置き換える（選択はすべて外れる）
    pub fn set_listing(&mut self, names: Vec<String>) {
        let files: Vector<FileEntry> = names.into_iter().map(|n| self.entry(n)).collect();
        self.files = files;
    }

    pub fn clear_listing(&mut self) {
        self.files = Vector::new();
    }

    pub fn listing(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    /// 同じ位置のまま名前だけ差し替える（選択状態は保持）
    pub fn apply_listing(&mut self, names: &[String]) {
        let folder = self.folder.clone();
        for (file, name) in self.files.iter_mut().zip(names) {
            if file.name != *name {
                file.name = name.clone();
                file.path = Path::new(&folder).join(name).to_string_lossy().to_string();
            }
        }
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.files.iter().filter(|f| f.selected).count()
    }

    pub fn set_all_selected(&mut self, selected: bool) {
        for file in self.files.iter_mut() {
            if file.selected != selected {
                file.selected = selected;
            }
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status_kind = kind;
        self.status_message = message.into();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
