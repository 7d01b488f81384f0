//! Word repository implementation.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use mnema_core::{
    CounterField, CounterUpdate, EnrichmentRecord, Error, MeaningEntry, NewWord, Pagination,
    Result, SortSpec, Word, WordRepository,
};

use crate::escape_like;

/// Column list shared by every SELECT/RETURNING over the words table.
const WORD_COLUMNS: &str = "id, word, pronunciation, meaning, synonyms, antonyms, origin, \
     relate_with, mnemonic, breakdown, no_of_times_opened, no_of_times_revised, \
     created_at_utc, updated_at_utc";

/// Columns supplied by callers on insert; the store fills the rest
/// (id, counters, timestamps).
const INSERT_COLUMNS: usize = 9;

/// PostgreSQL implementation of WordRepository.
pub struct PgWordRepository {
    pool: Pool<Postgres>,
}

impl PgWordRepository {
    /// Create a new PgWordRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Multi-row VALUES insert so a batch lands in one statement: all-or-nothing
/// without an explicit transaction.
fn build_insert_sql(rows: usize) -> String {
    let mut sql = String::from(
        "INSERT INTO words (word, pronunciation, meaning, synonyms, antonyms, origin, \
         relate_with, mnemonic, breakdown) VALUES ",
    );
    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for col in 0..INSERT_COLUMNS {
            if col > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&format!("${}", row * INSERT_COLUMNS + col + 1));
        }
        sql.push(')');
    }
    sql.push_str(&format!(" RETURNING {}", WORD_COLUMNS));
    sql
}

fn map_row_to_word(row: &sqlx::postgres::PgRow) -> Word {
    let meaning: Json<Vec<MeaningEntry>> = row.get("meaning");
    Word {
        id: row.get("id"),
        word: row.get("word"),
        pronunciation: row.get("pronunciation"),
        meaning: meaning.0,
        synonyms: row.get("synonyms"),
        antonyms: row.get("antonyms"),
        origin: row.get("origin"),
        relate_with: row.get("relate_with"),
        mnemonic: row.get("mnemonic"),
        breakdown: row.get("breakdown"),
        no_of_times_opened: row.get("no_of_times_opened"),
        no_of_times_revised: row.get("no_of_times_revised"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    }
}

#[async_trait]
impl WordRepository for PgWordRepository {
    async fn insert_batch(&self, entries: &[NewWord]) -> Result<Vec<Word>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let sql = build_insert_sql(entries.len());
        let mut query = sqlx::query(&sql);
        for entry in entries {
            query = query
                .bind(&entry.word)
                .bind(&entry.pronunciation)
                .bind(Json(&entry.meaning))
                .bind(&entry.synonyms)
                .bind(&entry.antonyms)
                .bind(&entry.origin)
                .bind(&entry.relate_with)
                .bind(&entry.mnemonic)
                .bind(&entry.breakdown);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(Error::Database)?;
        debug!(
            subsystem = "db",
            component = "words",
            op = "insert_batch",
            result_count = rows.len(),
            "inserted word batch"
        );
        Ok(rows.iter().map(map_row_to_word).collect())
    }

    async fn find_existing_names(&self, folded_names: &[String]) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT lower(word) AS folded FROM words WHERE lower(word) = ANY($1)",
        )
        .bind(folded_names)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(|row| row.get("folded")).collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Word> {
        let sql = format!("SELECT {} FROM words WHERE id = $1", WORD_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| map_row_to_word(&r)).ok_or(Error::WordNotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Word>> {
        let sql = format!(
            "SELECT {} FROM words WHERE lower(word) = lower($1) LIMIT 1",
            WORD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(|r| map_row_to_word(&r)))
    }

    async fn list(&self, sort: SortSpec, page: Pagination) -> Result<(Vec<Word>, i64)> {
        // Column and direction come from the fixed SortSpec vocabulary,
        // never from caller input.
        let sql = format!(
            "SELECT {} FROM words ORDER BY {} LIMIT $1 OFFSET $2",
            WORD_COLUMNS,
            sort.order_by_clause()
        );
        let rows = sqlx::query(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let count_row = sqlx::query("SELECT COUNT(*) AS count FROM words")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        let total: i64 = count_row.get("count");

        Ok((rows.iter().map(map_row_to_word).collect(), total))
    }

    async fn filter_substring(&self, fragment: &str) -> Result<Vec<Word>> {
        let pattern = format!("%{}%", escape_like(fragment));
        let sql = format!(
            "SELECT {} FROM words WHERE word ILIKE $1 ESCAPE '\\' ORDER BY word ASC, id ASC",
            WORD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.iter().map(map_row_to_word).collect())
    }

    async fn adjust_counter(
        &self,
        id: Uuid,
        field: CounterField,
        delta: i64,
    ) -> Result<CounterUpdate> {
        // Single UPDATE so the adjustment is atomic at the store; negative
        // results are permitted by contract.
        let sql = format!(
            "UPDATE words SET {col} = {col} + $1, updated_at_utc = now() WHERE id = $2 \
             RETURNING id, word, no_of_times_opened, no_of_times_revised",
            col = field.column()
        );
        let row = sqlx::query(&sql)
            .bind(delta)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        let row = row.ok_or(Error::WordNotFound(id))?;
        Ok(CounterUpdate {
            id: row.get("id"),
            word: row.get("word"),
            no_of_times_opened: row.get("no_of_times_opened"),
            no_of_times_revised: row.get("no_of_times_revised"),
        })
    }

    async fn apply_enrichment(&self, record: &EnrichmentRecord) -> Result<bool> {
        let meaning = (!record.meaning.is_empty()).then(|| Json(record.meaning.clone()));
        let synonyms = (!record.synonyms.is_empty()).then(|| record.synonyms.clone());
        let antonyms = (!record.antonyms.is_empty()).then(|| record.antonyms.clone());

        let result = sqlx::query(
            "UPDATE words SET \
                 pronunciation = COALESCE($2, pronunciation), \
                 meaning = COALESCE($3, meaning), \
                 synonyms = COALESCE($4, synonyms), \
                 antonyms = COALESCE($5, antonyms), \
                 origin = COALESCE($6, origin), \
                 relate_with = COALESCE($7, relate_with), \
                 mnemonic = COALESCE($8, mnemonic), \
                 breakdown = COALESCE($9, breakdown), \
                 updated_at_utc = now() \
             WHERE lower(word) = lower($1)",
        )
        .bind(&record.word)
        .bind(&record.pronunciation)
        .bind(meaning)
        .bind(synonyms)
        .bind(antonyms)
        .bind(&record.origin)
        .bind(&record.relate_with)
        .bind(&record.mnemonic)
        .bind(&record.breakdown)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_missing_mnemonic(&self, limit: i64) -> Result<Vec<Word>> {
        let sql = format!(
            "SELECT {} FROM words WHERE mnemonic IS NULL \
             ORDER BY created_at_utc ASC, id ASC LIMIT $1",
            WORD_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.iter().map(map_row_to_word).collect())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM words")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("count"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_insert_sql_single_row() {
        let sql = build_insert_sql(1);
        assert!(sql.starts_with("INSERT INTO words"));
        assert!(sql.contains("($1, $2, $3, $4, $5, $6, $7, $8, $9)"));
        assert!(sql.contains("RETURNING"));
    }

    #[test]
    fn test_build_insert_sql_numbers_rows_contiguously() {
        let sql = build_insert_sql(2);
        assert!(sql.contains("($1, $2, $3, $4, $5, $6, $7, $8, $9)"));
        assert!(sql.contains("($10, $11, $12, $13, $14, $15, $16, $17, $18)"));
        assert!(!sql.contains("$19"));
    }

    #[test]
    fn test_build_insert_sql_one_statement_per_batch() {
        let sql = build_insert_sql(3);
        assert_eq!(sql.matches("INSERT INTO").count(), 1);
        assert_eq!(sql.matches("RETURNING").count(), 1);
    }
}
