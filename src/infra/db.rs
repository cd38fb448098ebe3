use crate::search::{FilterValue, Predicate};
use crate::types::config::database_url;
use crate::types::{InfraError, InfraResult};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// データベース接続プールを作成
/// .envファイルからDATABASE_URLを読み込みます
pub async fn create_pool() -> InfraResult<PgPool> {
    let database_url = database_url()?;

    PgPool::connect(&database_url)
        .await
        .map_err(InfraError::database_connection)
}

/// データベースの初期化（マイグレーション実行）
pub async fn initialize_database(pool: &PgPool) -> InfraResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(InfraError::migration)
}

/// プールの作成とデータベース初期化を一括で行う便利関数
pub async fn setup_database() -> InfraResult<PgPool> {
    let pool = create_pool().await?;
    initialize_database(&pool).await?;
    Ok(pool)
}

/// 述語列を`WHERE ... AND ...`としてクエリに追加する
///
/// 値は全てバインドパラメータで渡す。部分一致は`ILIKE ... ESCAPE '\'`で、
/// パターンは`escape_ilike`済みの前提。述語が空ならWHERE句を付けない。
pub fn push_predicates(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        qb.push(if index == 0 { " WHERE " } else { " AND " });

        match predicate {
            Predicate::Contains { fields, pattern } => {
                qb.push("(");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(field.column())
                        .push(" ILIKE ")
                        .push_bind(pattern.clone())
                        .push(r" ESCAPE '\'");
                }
                qb.push(")");
            }
            Predicate::Equals { field, value } => {
                qb.push(field.column()).push(" = ");
                match value {
                    FilterValue::Text(text) => qb.push_bind(text.clone()),
                    FilterValue::Int(int) => qb.push_bind(*int),
                    FilterValue::Bool(flag) => qb.push_bind(*flag),
                };
            }
            Predicate::OnOrAfter { field, at } => {
                qb.push(field.column()).push(" >= ").push_bind(*at);
            }
            Predicate::OnOrBefore { field, at } => {
                qb.push(field.column()).push(" <= ").push_bind(*at);
            }
        }
    }
}
