use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::middleware::policy::{self, Action};
use crate::modules::questions::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;

pub(crate) const QUESTION_COLUMNS: &str = "id, farmer_id, title, content, category, tags, \
     view_count, is_resolved, is_approved, created_at, updated_at";

pub struct QuestionService;

impl QuestionService {
    /// Approved questions for the public feed, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "questions"))]
    pub async fn get_public_questions(db: &PgPool) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             WHERE is_approved = TRUE ORDER BY created_at DESC"
        );

        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching public questions");
                AppError::from(e)
            })?;

        Ok(questions)
    }

    /// The authenticated feed: farmers see their own questions, experts
    /// and admins see every approved one.
    #[instrument(skip(db, user), fields(user.id = %user.id, db.operation = "SELECT", db.table = "questions"))]
    pub async fn get_questions_for(db: &PgPool, user: &User) -> Result<Vec<Question>, AppError> {
        if user.role == UserRole::Farmer {
            let sql = format!(
                "SELECT {QUESTION_COLUMNS} FROM questions \
                 WHERE farmer_id = $1 ORDER BY created_at DESC"
            );

            let questions = sqlx::query_as::<_, Question>(&sql)
                .bind(user.id)
                .fetch_all(db)
                .await
                .map_err(|e| {
                    error!(error = %e, "Database error fetching own questions");
                    AppError::from(e)
                })?;

            debug!(count = %questions.len(), "Fetched farmer's own questions");
            return Ok(questions);
        }

        Self::get_public_questions(db).await
    }

    /// Approved questions nobody has resolved yet, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "questions"))]
    pub async fn get_unresolved_questions(db: &PgPool) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             WHERE is_resolved = FALSE AND is_approved = TRUE ORDER BY created_at DESC"
        );

        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching unresolved questions");
                AppError::from(e)
            })?;

        Ok(questions)
    }

    #[instrument(skip(db), fields(question.id = %id, db.operation = "SELECT", db.table = "questions"))]
    pub async fn get_question(db: &PgPool, id: Uuid) -> Result<Question, AppError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");

        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %id, "Database error fetching question");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Question not found")))?;

        Ok(question)
    }

    #[instrument(skip(db, dto), fields(farmer.id = %farmer_id, db.operation = "INSERT", db.table = "questions"))]
    pub async fn create_question(
        db: &PgPool,
        farmer_id: Uuid,
        dto: CreateQuestionDto,
    ) -> Result<Question, AppError> {
        let sql = format!(
            "INSERT INTO questions (farmer_id, title, content, category, tags) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {QUESTION_COLUMNS}"
        );

        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(farmer_id)
            .bind(&dto.title)
            .bind(&dto.content)
            .bind(&dto.category)
            .bind(&dto.tags)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating question");
                AppError::from(e)
            })?;

        info!(question.id = %question.id, "Question created");

        Ok(question)
    }

    /// Updates title, content, category or tags. The caller must own the
    /// question or be an admin; resolution state is untouchable here.
    #[instrument(skip(db, caller, dto), fields(question.id = %id, caller.id = %caller.id, db.operation = "UPDATE", db.table = "questions"))]
    pub async fn update_question(
        db: &PgPool,
        id: Uuid,
        caller: &User,
        dto: UpdateQuestionDto,
    ) -> Result<Question, AppError> {
        let current = Self::get_question(db, id).await?;

        policy::authorize_owned(caller, Action::QuestionUpdate, current.farmer_id)?;

        let sql = format!(
            "UPDATE questions SET title = $2, content = $3, category = $4, tags = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING {QUESTION_COLUMNS}"
        );

        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .bind(dto.title.unwrap_or(current.title))
            .bind(dto.content.unwrap_or(current.content))
            .bind(dto.category.unwrap_or(current.category))
            .bind(dto.tags.or(current.tags))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %id, "Database error updating question");
                AppError::from(e)
            })?;

        info!(question.id = %question.id, "Question updated");

        Ok(question)
    }

    #[instrument(skip(db, caller), fields(question.id = %id, caller.id = %caller.id, db.operation = "DELETE", db.table = "questions"))]
    pub async fn delete_question(db: &PgPool, id: Uuid, caller: &User) -> Result<(), AppError> {
        let current = Self::get_question(db, id).await?;

        policy::authorize_owned(caller, Action::QuestionDelete, current.farmer_id)?;

        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %id, "Database error deleting question");
                AppError::from(e)
            })?;

        info!(question.id = %id, "Question deleted");

        Ok(())
    }
}
