use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
    pub rating: i64,
}

pub struct NewQuestion<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: i64,
    pub difficulty: i64,
    pub rating: i64,
}

/// Which questions a listing or count covers.
#[derive(Debug, Clone, Copy)]
pub enum QuestionFilter {
    All,
    Category(i64),
}

/// `LIMIT`/`OFFSET` pair for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

const SELECT_QUESTIONS: &str =
    "SELECT id, question, answer, category, difficulty, rating FROM questions";

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: QuestionFilter) {
    if let QuestionFilter::Category(category) = filter {
        builder.push(" WHERE category = ").push_bind(category);
    }
}

pub async fn list_questions(
    pool: &SqlitePool,
    filter: QuestionFilter,
    window: Option<Window>,
) -> sqlx::Result<Vec<Question>> {
    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_QUESTIONS);
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY id");
    if let Some(window) = window {
        builder
            .push(" LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
    }

    builder.build_query_as::<Question>().fetch_all(pool).await
}

pub async fn count_questions(pool: &SqlitePool, filter: QuestionFilter) -> sqlx::Result<i64> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM questions");
    push_filter(&mut builder, filter);

    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    list_questions(pool, QuestionFilter::All, None).await
}

/// Case-insensitive substring search on the question text.
///
/// Matching is done on Unicode lowercase, which SQLite's `LIKE` only does for ASCII.
/// Returns one window of the matches in id order and the total number of matches.
pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    window: Window,
) -> sqlx::Result<(Vec<Question>, i64)> {
    let matches = matching(get_all_questions(pool).await?, term);
    let total = matches.len() as i64;

    let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit).unwrap_or(0);
    let page = matches.into_iter().skip(offset).take(limit).collect();

    Ok((page, total))
}

fn matching(questions: Vec<Question>, term: &str) -> Vec<Question> {
    let term = term.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect()
}

pub async fn create_question(pool: &SqlitePool, new: &NewQuestion<'_>) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty, rating) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(new.question)
    .bind(new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .bind(new.rating)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns `false` when no question has that id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(deleted > 0)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty, rating)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty,
                rating = excluded.rating
            "#,
        )
        .bind(q.id)
        .bind(&q.question)
        .bind(&q.answer)
        .bind(q.category)
        .bind(q.difficulty)
        .bind(q.rating)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
