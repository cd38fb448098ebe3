pub mod model;
pub mod repository;

// 公開APIの再エクスポート

// model.rsから
pub use model::{Article, ArticleWithSource, NewArticle};

// repository.rsから
pub use repository::{
    create_article, create_articles, delete_article, exists_article_by_url, find_existing_urls,
    get_article, get_article_with_source, list_articles, list_articles_with_source,
    search_articles, search_articles_by_keyword, search_articles_by_keywords, update_article,
};
