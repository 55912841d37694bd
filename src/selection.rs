use tracing::debug;

/// 前回のクリック順と、ツールキットが報告する現在の選択集合（順序なし）から
/// 新しいクリック順を組み立てる。
///
/// 選択が外れた index は順序を保ったまま取り除き、新しく選ばれた index は
/// 報告された順に末尾へ追加する。
pub fn reconcile(previous: &[usize], current: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = previous
        .iter()
        .copied()
        .filter(|i| current.contains(i))
        .collect();
    for &i in current {
        if !order.contains(&i) {
            order.push(i);
        }
    }
    order
}

/// 手動クリック順と「すべて選択」モードの管理
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    order: Vec<usize>,
    select_all: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    /// 選択変更イベント。すべて選択モード中は順序を再計算しない
    pub fn on_selection_changed(&mut self, current: &[usize]) {
        if self.select_all {
            return;
        }
        self.order = reconcile(&self.order, current);
        debug!(order = ?self.order, "selection order updated");
    }

    pub fn select_all(&mut self, len: usize) {
        self.select_all = true;
        self.order = (0..len).collect();
    }

    pub fn deselect_all(&mut self) {
        self.select_all = false;
        self.order.clear();
    }

    /// リネームに使う順序
    ///
    /// 手動モードではクリック順のうち現在も選択中のもの、
    /// すべて選択モードでは選択中 index の昇順。
    pub fn effective_order(&self, current: &[usize]) -> Vec<usize> {
        if self.select_all {
            let mut ascending = current.to_vec();
            ascending.sort_unstable();
            ascending.dedup();
            ascending
        } else {
            self.order
                .iter()
                .copied()
                .filter(|i| current.contains(i))
                .collect()
        }
    }

    /// リネーム成功後のリセット
    pub fn finish_batch(&mut self) {
        self.deselect_all();
    }
}
