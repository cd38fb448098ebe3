/// フィード取り込みの結果
/// 新規挿入と、既存URLのためスキップした件数を記録
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestResult {
    /// 新規挿入された件数
    pub inserted: usize,
    /// 既に保存済みのためスキップした件数
    pub skipped: usize,
}

impl IngestResult {
    /// 新しい結果を作成
    pub fn new(inserted: usize, skipped: usize) -> Self {
        Self { inserted, skipped }
    }

    /// 空の結果を作成
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// 結果を合算する
    pub fn merge(self, other: Self) -> Self {
        Self::new(self.inserted + other.inserted, self.skipped + other.skipped)
    }

    /// ソース名を指定して表示用の文字列を生成
    pub fn display_with_source(&self, source_name: &str) -> String {
        format!(
            "{}取り込み完了: 新規{}件、既存スキップ{}件",
            source_name, self.inserted, self.skipped
        )
    }
}

impl std::fmt::Display for IngestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_with_source("フィード"))
    }
}
