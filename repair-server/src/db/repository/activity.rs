//! Activity Source Repository
//!
//! Read-only access to the blog and contact-inbox tables. They are owned by
//! other services and only feed the admin activity list.

use super::RepoResult;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BlogPostEntry {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ContactMessageEntry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub created_at: i64,
}

pub async fn find_recent_blog_posts(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<BlogPostEntry>> {
    let posts = sqlx::query_as::<_, BlogPostEntry>(
        "SELECT id, title, slug, created_at FROM blog_post ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn find_recent_contact_messages(
    pool: &SqlitePool,
    limit: i64,
) -> RepoResult<Vec<ContactMessageEntry>> {
    let messages = sqlx::query_as::<_, ContactMessageEntry>(
        "SELECT id, name, email, subject, created_at FROM contact_message ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_recent_entries_limited_newest_first() {
        let pool = test_support::pool().await;
        for (id, at) in [(1, 10), (2, 30), (3, 20)] {
            sqlx::query("INSERT INTO blog_post (id, title, slug, created_at) VALUES (?, ?, ?, ?)")
                .bind(id)
                .bind(format!("Post {id}"))
                .bind(format!("post-{id}"))
                .bind(at)
                .execute(&pool)
                .await
                .unwrap();
        }
        sqlx::query("INSERT INTO contact_message (id, name, email, subject, created_at) VALUES (1, 'Ali', 'ali@x.com', 'Fiyat', 5)")
            .execute(&pool)
            .await
            .unwrap();

        let posts = find_recent_blog_posts(&pool, 2).await.unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [2, 3]);

        let messages = find_recent_contact_messages(&pool, 10).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].subject, "Fiyat");
    }
}
