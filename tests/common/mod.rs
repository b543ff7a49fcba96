use krushimitra::modules::users::model::UserRole;
use krushimitra::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[allow(dead_code)]
pub struct TestQuestion {
    pub id: Uuid,
    pub farmer_id: Uuid,
}

/// Create a test user with the given role.
///
/// The account is enabled and approved, so experts created here may
/// answer immediately. Use [`create_unapproved_expert`] for the
/// pre-approval state.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
    role: UserRole,
) -> TestUser {
    let hashed = hash_password(password).unwrap();
    let email = format!("{}@test.com", username);

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, first_name, last_name, role, is_approved)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE)
         RETURNING id",
    )
    .bind(username)
    .bind(&email)
    .bind(&hashed)
    .bind("Test")
    .bind("User")
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        username: username.to_string(),
        email,
        password: password.to_string(),
        role,
    }
}

/// Create an expert that has registered but not yet been approved.
#[allow(dead_code)]
pub async fn create_unapproved_expert(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();
    let email = format!("{}@test.com", username);

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, first_name, last_name, role, is_approved)
         VALUES ($1, $2, $3, $4, $5, $6, FALSE)
         RETURNING id",
    )
    .bind(username)
    .bind(&email)
    .bind(&hashed)
    .bind("Test")
    .bind("Expert")
    .bind(UserRole::Expert)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        username: username.to_string(),
        email,
        password: password.to_string(),
        role: UserRole::Expert,
    }
}

#[allow(dead_code)]
pub async fn create_test_question(
    tx: &mut Transaction<'_, Postgres>,
    farmer_id: Uuid,
    title: &str,
) -> TestQuestion {
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO questions (farmer_id, title, content, category)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(farmer_id)
    .bind(title)
    .bind("Test question content for integration tests")
    .bind("General")
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestQuestion { id, farmer_id }
}

#[allow(dead_code)]
pub async fn create_test_answer(
    tx: &mut Transaction<'_, Postgres>,
    question_id: Uuid,
    expert_id: Uuid,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO answers (question_id, expert_id, content)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(question_id)
    .bind(expert_id)
    .bind("Test answer content for integration tests")
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_listing(
    tx: &mut Transaction<'_, Postgres>,
    farmer_id: Uuid,
    product_name: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO product_listings (farmer_id, product_name, category, quantity, unit, price)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(farmer_id)
    .bind(product_name)
    .bind("Grains")
    .bind(100.0_f64)
    .bind("kg")
    .bind(25.0_f64)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub fn generate_unique_username() -> String {
    // Keep it short enough for the 50 character column.
    format!("user-{}", &Uuid::new_v4().simple().to_string()[..12])
}

#[allow(dead_code)]
pub fn generate_unique_title() -> String {
    format!("Question {}", Uuid::new_v4())
}
