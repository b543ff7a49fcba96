use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::middleware::policy::{self, Action};
use crate::modules::answers::model::{Answer, CreateAnswerDto, UpdateAnswerDto};
use crate::modules::questions::model::Question;
use crate::modules::questions::service::{QUESTION_COLUMNS, QuestionService};
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

const ANSWER_COLUMNS: &str = "id, question_id, expert_id, content, is_accepted, is_approved, \
     upvotes, downvotes, created_at, updated_at";

pub struct AnswerService;

impl AnswerService {
    /// Approved answers for a question, best-voted first, oldest breaking
    /// ties. 404s when the question itself is absent.
    #[instrument(skip(db), fields(question.id = %question_id, db.operation = "SELECT", db.table = "answers"))]
    pub async fn get_answers_by_question(
        db: &PgPool,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, AppError> {
        QuestionService::get_question(db, question_id).await?;

        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers \
             WHERE question_id = $1 AND is_approved = TRUE \
             ORDER BY upvotes DESC, created_at ASC"
        );

        let answers = sqlx::query_as::<_, Answer>(&sql)
            .bind(question_id)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %question_id, "Database error fetching answers");
                AppError::from(e)
            })?;

        Ok(answers)
    }

    /// Approved answers written by one expert, newest first. 404s when the
    /// expert is absent.
    #[instrument(skip(db), fields(expert.id = %expert_id, db.operation = "SELECT", db.table = "answers"))]
    pub async fn get_answers_by_expert(
        db: &PgPool,
        expert_id: Uuid,
    ) -> Result<Vec<Answer>, AppError> {
        UserService::get_user(db, expert_id).await?;

        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers \
             WHERE expert_id = $1 AND is_approved = TRUE ORDER BY created_at DESC"
        );

        let answers = sqlx::query_as::<_, Answer>(&sql)
            .bind(expert_id)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, expert.id = %expert_id, "Database error fetching answers");
                AppError::from(e)
            })?;

        Ok(answers)
    }

    /// Creates an answer. The caller's role has already been checked; this
    /// gate rejects experts awaiting admin approval, then missing questions.
    #[instrument(skip(db, expert, dto), fields(expert.id = %expert.id, question.id = %dto.question_id, db.operation = "INSERT", db.table = "answers"))]
    pub async fn create_answer(
        db: &PgPool,
        expert: &User,
        dto: CreateAnswerDto,
    ) -> Result<Answer, AppError> {
        if !expert.is_approved {
            warn!(expert.id = %expert.id, "Unapproved expert attempted to answer");
            return Err(AppError::expert_not_approved(anyhow!(
                "Expert account not approved"
            )));
        }

        let question_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM questions WHERE id = $1)")
                .bind(dto.question_id)
                .fetch_one(db)
                .await
                .map_err(|e| {
                    error!(error = %e, "Database error checking question existence");
                    AppError::from(e)
                })?;

        if !question_exists {
            return Err(AppError::not_found(anyhow!("Question not found")));
        }

        let sql = format!(
            "INSERT INTO answers (question_id, expert_id, content) \
             VALUES ($1, $2, $3) RETURNING {ANSWER_COLUMNS}"
        );

        let answer = sqlx::query_as::<_, Answer>(&sql)
            .bind(dto.question_id)
            .bind(expert.id)
            .bind(&dto.content)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating answer");
                AppError::from(e)
            })?;

        info!(answer.id = %answer.id, "Answer created");

        Ok(answer)
    }

    #[instrument(skip(db), fields(answer.id = %id, db.operation = "SELECT", db.table = "answers"))]
    pub async fn get_answer(db: &PgPool, id: Uuid) -> Result<Answer, AppError> {
        let sql = format!("SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1");

        let answer = sqlx::query_as::<_, Answer>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, answer.id = %id, "Database error fetching answer");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Answer not found")))?;

        Ok(answer)
    }

    /// Updates content or moderation state. The caller must own the answer
    /// or be an admin.
    #[instrument(skip(db, caller, dto), fields(answer.id = %id, caller.id = %caller.id, db.operation = "UPDATE", db.table = "answers"))]
    pub async fn update_answer(
        db: &PgPool,
        id: Uuid,
        caller: &User,
        dto: UpdateAnswerDto,
    ) -> Result<Answer, AppError> {
        let current = Self::get_answer(db, id).await?;

        policy::authorize_owned(caller, Action::AnswerUpdate, current.expert_id)?;

        let sql = format!(
            "UPDATE answers SET content = $2, is_approved = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {ANSWER_COLUMNS}"
        );

        let answer = sqlx::query_as::<_, Answer>(&sql)
            .bind(id)
            .bind(dto.content.unwrap_or(current.content))
            .bind(dto.is_approved.unwrap_or(current.is_approved))
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, answer.id = %id, "Database error updating answer");
                AppError::from(e)
            })?;

        info!(answer.id = %answer.id, "Answer updated");

        Ok(answer)
    }

    #[instrument(skip(db, caller), fields(answer.id = %id, caller.id = %caller.id, db.operation = "DELETE", db.table = "answers"))]
    pub async fn delete_answer(db: &PgPool, id: Uuid, caller: &User) -> Result<(), AppError> {
        let current = Self::get_answer(db, id).await?;

        policy::authorize_owned(caller, Action::AnswerDelete, current.expert_id)?;

        sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                error!(error = %e, answer.id = %id, "Database error deleting answer");
                AppError::from(e)
            })?;

        info!(answer.id = %id, "Answer deleted");

        Ok(())
    }

    /// Accepts an answer on behalf of the question's owner.
    ///
    /// Runs as one transaction: the parent question row is locked, any
    /// previously accepted answer is cleared, the target is marked accepted
    /// and the question resolved. Concurrent acceptances for the same
    /// question serialize on the row lock, so at most one answer ends up
    /// accepted no matter the interleaving. Any failure rolls the whole
    /// thing back.
    #[instrument(skip(db, caller), fields(answer.id = %id, caller.id = %caller.id, db.operation = "UPDATE", db.table = "answers"))]
    pub async fn accept_answer(db: &PgPool, id: Uuid, caller: &User) -> Result<Answer, AppError> {
        let mut tx = db.begin().await.map_err(|e| {
            error!(error = %e, "Database error starting acceptance transaction");
            AppError::from(e)
        })?;

        let sql = format!("SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1");
        let answer = sqlx::query_as::<_, Answer>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, answer.id = %id, "Database error fetching answer");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Answer not found")))?;

        // Lock the parent so concurrent acceptances for this question queue
        // behind us.
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1 FOR UPDATE");
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(answer.question_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %answer.question_id, "Database error locking question");
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow!("Question not found")))?;

        policy::authorize_owned(caller, Action::AnswerAccept, question.farmer_id)?;

        sqlx::query(
            "UPDATE answers SET is_accepted = FALSE, updated_at = NOW() \
             WHERE question_id = $1 AND is_accepted = TRUE AND id <> $2",
        )
        .bind(question.id)
        .bind(answer.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error clearing previous acceptance");
            AppError::from(e)
        })?;

        let sql = format!(
            "UPDATE answers SET is_accepted = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {ANSWER_COLUMNS}"
        );
        let accepted = sqlx::query_as::<_, Answer>(&sql)
            .bind(answer.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, answer.id = %answer.id, "Database error accepting answer");
                AppError::from(e)
            })?;

        sqlx::query("UPDATE questions SET is_resolved = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(question.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %question.id, "Database error resolving question");
                AppError::from(e)
            })?;

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Database error committing acceptance");
            AppError::from(e)
        })?;

        info!(
            answer.id = %accepted.id,
            question.id = %question.id,
            "Answer accepted, question resolved"
        );

        Ok(accepted)
    }
}
