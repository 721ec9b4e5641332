use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Case-insensitive identity on query text. Lookups go through
        // LOWER(original_query), so index the expression directly.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_search_queries_original_query \
             ON search_queries(LOWER(original_query))",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_search_queries_original_query")
            .await?;

        Ok(())
    }
}
