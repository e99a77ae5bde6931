pub mod news_db_operations;
