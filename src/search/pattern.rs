//! PostgreSQLの`ILIKE`パターン用のエスケープと照合
//!
//! メタ文字は3つ: エスケープ文字`\`、任意長ワイルドカード`%`、1文字ワイルドカード`_`。
//! 別のストレージへ移す場合もエスケープ文字を最初に処理する順序は変えないこと。

/// エスケープ文字
pub const LIKE_ESCAPE: char = '\\';
/// 任意長（0文字以上）にマッチするワイルドカード
pub const LIKE_MATCH_ANY: char = '%';
/// 任意の1文字にマッチするワイルドカード
pub const LIKE_MATCH_ONE: char = '_';

/// キーワードを部分一致用の`ILIKE`パターンに変換する
///
/// 処理順は (1) `\` → `\\`、(2) `%` → `\%`、(3) `_` → `\_`。
/// 元の文字を1回だけ走査して置換するため、挿入した`\`が再度エスケープされることはない。
/// 最後に両端を`%`で囲み「含む」検索にする。
///
/// # Examples
/// ```
/// use feedstore::search::escape_ilike;
/// assert_eq!(escape_ilike("Go"), "%Go%");
/// assert_eq!(escape_ilike("100%"), r"%100\%%");
/// assert_eq!(escape_ilike(r"%_\"), r"%\%\_\\%");
/// assert_eq!(escape_ilike(""), "%%");
/// assert_eq!(escape_ilike("日本語"), "%日本語%");
/// ```
pub fn escape_ilike(keyword: &str) -> String {
    let extra = keyword
        .chars()
        .filter(|c| matches!(*c, LIKE_ESCAPE | LIKE_MATCH_ANY | LIKE_MATCH_ONE))
        .count();
    let mut pattern = String::with_capacity(keyword.len() + extra + 2);

    pattern.push(LIKE_MATCH_ANY);
    for c in keyword.chars() {
        if matches!(c, LIKE_ESCAPE | LIKE_MATCH_ANY | LIKE_MATCH_ONE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push(LIKE_MATCH_ANY);

    pattern
}

/// [`escape_ilike`]の逆変換
///
/// 両端の`%`を外し、エスケープを解除して元のキーワードを返す。
/// `escape_ilike`が生成し得ない文字列（囲みがない、エスケープされていない
/// ワイルドカード、末尾の単独`\`）には`None`を返す。
pub fn unescape_ilike(pattern: &str) -> Option<String> {
    let inner = pattern
        .strip_prefix(LIKE_MATCH_ANY)?
        .strip_suffix(LIKE_MATCH_ANY)?;

    let mut keyword = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            LIKE_ESCAPE => keyword.push(chars.next()?),
            LIKE_MATCH_ANY | LIKE_MATCH_ONE => return None,
            _ => keyword.push(c),
        }
    }
    Some(keyword)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    One,
    Any,
}

/// コンパイル済みの`ILIKE`パターン（大文字小文字を区別しない）
///
/// インメモリのストアで述語を評価するために使う。`\`に続く文字はリテラル。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    tokens: Vec<Token>,
}

impl LikePattern {
    pub fn compile(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                LIKE_ESCAPE => match chars.next() {
                    Some(escaped) => Token::Literal(fold(escaped)),
                    // PostgreSQLでは末尾の単独エスケープはエラーだが、ここではリテラル扱い
                    None => Token::Literal(LIKE_ESCAPE),
                },
                LIKE_MATCH_ANY => {
                    if tokens.last() == Some(&Token::Any) {
                        continue;
                    }
                    Token::Any
                }
                LIKE_MATCH_ONE => Token::One,
                other => Token::Literal(fold(other)),
            };
            tokens.push(token);
        }
        Self { tokens }
    }

    /// 文字列全体がパターンにマッチするか
    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().map(fold).collect();
        let tokens = &self.tokens;

        let (mut t, mut p) = (0usize, 0usize);
        // 直近の`%`の位置と、そこから再試行するテキスト位置
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(Token::Any) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(Token::One) => {
                    t += 1;
                    p += 1;
                }
                Some(Token::Literal(c)) if *c == text[t] => {
                    t += 1;
                    p += 1;
                }
                _ => match backtrack {
                    Some((star_p, star_t)) => {
                        backtrack = Some((star_p, star_t + 1));
                        p = star_p + 1;
                        t = star_t + 1;
                    }
                    None => return false,
                },
            }
        }

        tokens[p..].iter().all(|token| *token == Token::Any)
    }
}

/// 大文字小文字を畳み込む（1文字→1文字に収まる範囲）
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
