//! アプリケーション層（ワークフロー）

pub mod ingest;

pub use ingest::{
    fetch_feed_items, ingest_active_sources, ingest_source, ingest_source_with_store, partition_new,
};
