//! Demo dataset seeding.
//!
//! Each table is seeded only when it is empty, so existing data is never
//! touched. The accounts here are the well-known demo logins; rotate them
//! before exposing an instance publicly.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;

use crate::modules::users::model::UserRole;
use crate::utils::password::hash_password;

pub async fn seed_demo_data(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    if table_is_empty(db, "users").await? {
        seed_users(db).await?;
    }
    if table_is_empty(db, "crops").await? {
        seed_crops(db).await?;
    }
    if table_is_empty(db, "government_schemes").await? {
        seed_schemes(db).await?;
    }
    if table_is_empty(db, "market_prices").await? {
        seed_market_prices(db).await?;
    }

    Ok(())
}

async fn table_is_empty(db: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    // Table names come from the call sites above, never from input.
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db)
        .await?;

    Ok(count == 0)
}

async fn seed_users(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let admin_hash =
        hash_password("admin123").map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let farmer_hash =
        hash_password("farmer123").map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let expert_hash =
        hash_password("expert123").map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    sqlx::query(
        "INSERT INTO users (username, email, password, first_name, last_name, role, \
         phone_number, address, city, state, pincode) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind("admin")
    .bind("admin@krushimitra.com")
    .bind(&admin_hash)
    .bind("Admin")
    .bind("User")
    .bind(UserRole::Admin)
    .bind("9876543210")
    .bind("Admin Address")
    .bind("Mumbai")
    .bind("Maharashtra")
    .bind("400001")
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO users (username, email, password, first_name, last_name, role, \
         phone_number, address, city, state, pincode, farm_size, primary_crops) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind("farmer1")
    .bind("farmer1@example.com")
    .bind(&farmer_hash)
    .bind("Rajesh")
    .bind("Patel")
    .bind(UserRole::Farmer)
    .bind("9876543211")
    .bind("Farm Address")
    .bind("Pune")
    .bind("Maharashtra")
    .bind("411001")
    .bind("5 acres")
    .bind("Wheat, Rice")
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO users (username, email, password, first_name, last_name, role, \
         phone_number, address, city, state, pincode, expertise, qualifications, rating, \
         total_answers, is_approved) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind("expert1")
    .bind("expert1@example.com")
    .bind(&expert_hash)
    .bind("Dr. Priya")
    .bind("Sharma")
    .bind(UserRole::Expert)
    .bind("9876543212")
    .bind("Expert Address")
    .bind("Delhi")
    .bind("Delhi")
    .bind("110001")
    .bind("Agricultural Science")
    .bind("PhD in Agriculture, 10 years experience")
    .bind(4.5_f64)
    .bind(25_i32)
    .bind(true)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Seeded demo accounts: admin, farmer1, expert1");

    Ok(())
}

async fn seed_crops(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    // (name, description, season, soil, climate, water, duration, yield, price)
    let crops: &[(&str, &str, &str, &str, &str, &str, &str, &str, &str)] = &[
        (
            "Rice",
            "Rice is the staple food of India and is grown in almost all states.",
            "Kharif",
            "Clay",
            "Tropical",
            "High",
            "120-150 days",
            "4-6 tons",
            "₹1800-2200 per quintal",
        ),
        (
            "Maize",
            "Maize is a versatile crop used for food, feed, and industrial purposes.",
            "Kharif",
            "Loamy",
            "Tropical",
            "Medium",
            "90-120 days",
            "3-4 tons",
            "₹1400-1800 per quintal",
        ),
        (
            "Wheat",
            "Wheat is the second most important cereal crop in India.",
            "Rabi",
            "Loamy",
            "Temperate",
            "Medium",
            "110-130 days",
            "3-5 tons",
            "₹2000-2400 per quintal",
        ),
        (
            "Mustard",
            "Mustard is an important oilseed crop grown in India.",
            "Rabi",
            "Sandy",
            "Temperate",
            "Low",
            "90-110 days",
            "1.5-2 tons",
            "₹4500-5500 per quintal",
        ),
        (
            "Watermelon",
            "Watermelon is a popular summer fruit crop.",
            "Zaid",
            "Sandy",
            "Tropical",
            "High",
            "80-100 days",
            "25-30 tons",
            "₹15-25 per kg",
        ),
    ];

    let mut tx = db.begin().await?;

    for (name, description, season, soil, climate, water, duration, yield_, price) in crops {
        sqlx::query(
            "INSERT INTO crops (name, description, season, soil_type, climate, \
             water_requirement, growth_duration, yield_per_hectare, market_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(name)
        .bind(description)
        .bind(season)
        .bind(soil)
        .bind(climate)
        .bind(water)
        .bind(duration)
        .bind(yield_)
        .bind(price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(count = crops.len(), "Seeded crop catalog");

    Ok(())
}

async fn seed_schemes(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    // (title, description, category, eligibility, benefits, process, documents,
    //  contact, website, deadline)
    let schemes: &[(
        &str,
        &str,
        &str,
        &str,
        &str,
        &str,
        &str,
        &str,
        &str,
        &str,
    )] = &[
        (
            "PM-KISAN (Pradhan Mantri Kisan Samman Nidhi)",
            "Direct income support of ₹6,000 per year to eligible farmer families.",
            "Income Support",
            "Small and marginal farmers with landholding up to 2 hectares",
            "₹6,000 per year in three equal installments of ₹2,000 each",
            "Apply through Common Service Centers or online portal",
            "Aadhaar card, land records, bank account details",
            "Toll-free: 1800-180-1551",
            "https://pmkisan.gov.in",
            "Ongoing",
        ),
        (
            "PMFBY (Pradhan Mantri Fasal Bima Yojana)",
            "Comprehensive crop insurance scheme to protect farmers against natural calamities.",
            "Crop Insurance",
            "All farmers growing notified crops",
            "Insurance coverage for crop loss due to natural calamities",
            "Apply through banks, insurance companies, or online",
            "Land records, crop details, bank account",
            "Toll-free: 1800-180-1551",
            "https://pmfby.gov.in",
            "Ongoing",
        ),
        (
            "Soil Health Card Scheme",
            "Free soil testing and recommendations for farmers.",
            "Soil Management",
            "All farmers",
            "Free soil testing and fertilizer recommendations",
            "Apply at nearest agriculture office",
            "Aadhaar card, land records",
            "Contact local agriculture department",
            "https://soilhealth.dac.gov.in",
            "Ongoing",
        ),
    ];

    let mut tx = db.begin().await?;

    for (title, description, category, eligibility, benefits, process, documents, contact, website, deadline) in
        schemes
    {
        sqlx::query(
            "INSERT INTO government_schemes (title, description, category, eligibility, \
             benefits, application_process, documents_required, contact_info, website, deadline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(eligibility)
        .bind(benefits)
        .bind(process)
        .bind(documents)
        .bind(contact)
        .bind(website)
        .bind(deadline)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(count = schemes.len(), "Seeded government schemes");

    Ok(())
}

async fn seed_market_prices(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let date: NaiveDate = "2024-01-15".parse()?;

    // (commodity, category, min, max, modal, market, state, district)
    let prices: &[(&str, &str, f64, f64, f64, &str, &str, &str)] = &[
        ("Rice", "Cereals", 1800.0, 2200.0, 2000.0, "APMC Mumbai", "Maharashtra", "Mumbai"),
        ("Wheat", "Cereals", 2000.0, 2400.0, 2200.0, "APMC Delhi", "Delhi", "Delhi"),
        ("Mustard", "Oilseeds", 4500.0, 5500.0, 5000.0, "APMC Jaipur", "Rajasthan", "Jaipur"),
        ("Maize", "Cereals", 1400.0, 1800.0, 1600.0, "APMC Pune", "Maharashtra", "Pune"),
    ];

    let mut tx = db.begin().await?;

    for (commodity, category, min, max, modal, market, state, district) in prices {
        sqlx::query(
            "INSERT INTO market_prices (commodity_name, category, unit, min_price, max_price, \
             modal_price, market_name, state, district, date) \
             VALUES ($1, $2, 'quintal', $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(commodity)
        .bind(category)
        .bind(min)
        .bind(max)
        .bind(modal)
        .bind(market)
        .bind(state)
        .bind(district)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(count = prices.len(), "Seeded market prices");

    Ok(())
}
