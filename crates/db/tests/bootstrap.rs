use sqlx::PgPool;

/// Connect, migrate, and verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    raisehub_db::health_check(&pool).await.unwrap();

    let roles: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY name")
        .fetch_all(&pool)
        .await
        .unwrap();
    let roles: Vec<&str> = roles.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(roles, ["admin", "founder", "investor"]);

    let (templates,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM predefined_milestones WHERE is_active")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(templates >= 3, "expected seeded milestone templates, got {templates}");
}

/// Every table with an `updated_at` column carries the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_present(pool: PgPool) {
    let missing: Vec<(String,)> = sqlx::query_as(
        "SELECT c.table_name::text
         FROM information_schema.columns c
         WHERE c.table_schema = 'public' AND c.column_name = 'updated_at'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.triggers t
               WHERE t.event_object_table = c.table_name
                 AND t.action_statement LIKE '%set_updated_at%'
           )",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(missing.is_empty(), "tables without updated_at trigger: {missing:?}");
}
