use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use axum_courier_api::{
    config::AppConfig,
    db::create_pool,
    models::{OrderStatus, PackageType, PriorityLevel, UserRole},
};

// Fixed ids keep the fixtures idempotent: rerunning the seed hits the
// ON CONFLICT guards instead of inserting twice.
const PICKUP_ADDRESS_ID: &str = "0b8a4e7e-27f8-4cde-9f35-2d2f0b6c1a01";
const DELIVERY_ADDRESS_ID: &str = "0b8a4e7e-27f8-4cde-9f35-2d2f0b6c1a02";
const PACKAGE_ID: &str = "3f1c5b2a-6c77-4a44-8c15-7d4b9e0c2b11";
const ORDER_ID: &str = "5d9e8f00-1b23-4c56-9a78-0e1f2a3b4c21";
const TRACKING_ID: &str = "7a6b5c4d-3e2f-4a1b-8c9d-0e1f2a3b4c31";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let customer_id =
        ensure_user(&pool, "customer@example.com", "customer123", UserRole::Customer).await?;
    let courier_id =
        ensure_user(&pool, "courier@example.com", "courier123", UserRole::Courier).await?;
    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", UserRole::Admin).await?;

    ensure_user_profile(&pool, customer_id, "Casey", "Fletcher", Some("+1-555-0101")).await?;
    ensure_user_profile(&pool, courier_id, "Riley", "Okafor", Some("+1-555-0102")).await?;
    ensure_user_profile(&pool, admin_id, "Morgan", "Diaz", None).await?;
    ensure_courier_profile(&pool, courier_id, "VAN", "CR-8841").await?;

    seed_addresses(&pool).await?;
    seed_package(&pool).await?;
    seed_order(&pool, customer_id, admin_id).await?;
    seed_pricing_rules(&pool).await?;

    println!(
        "Seed completed. Customer: {customer_id}, Courier: {courier_id}, Admin: {admin_id}"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={})", role.as_str());
    Ok(user_id)
}

async fn ensure_user_profile(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    first_name: &str,
    last_name: &str,
    phone: Option<&str>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (id, user_id, first_name, last_name, phone)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .bind(phone)
    .execute(pool)
    .await?;
    Ok(())
}

async fn ensure_courier_profile(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    vehicle_type: &str,
    license_plate: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO courier_profiles (id, user_id, vehicle_type, license_plate)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(vehicle_type)
    .bind(license_plate)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_addresses(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let addresses = [
        (
            Uuid::parse_str(PICKUP_ADDRESS_ID)?,
            "1 Main St",
            "Springfield",
            "IL",
            "62701",
        ),
        (
            Uuid::parse_str(DELIVERY_ADDRESS_ID)?,
            "500 Lakeshore Dr",
            "Chicago",
            "IL",
            "60611",
        ),
    ];

    for (id, street, city, state, zip_code) in addresses {
        sqlx::query(
            r#"
            INSERT INTO addresses (id, street, city, state, zip_code)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(street)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .execute(pool)
        .await?;
    }

    println!("Seeded addresses");
    Ok(())
}

async fn seed_package(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO packages (id, type, weight_kg, dimensions, is_fragile, declared_value)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(Uuid::parse_str(PACKAGE_ID)?)
    .bind(PackageType::SmallPackage)
    .bind(Decimal::new(250, 2))
    .bind("30x20x10 cm")
    .bind(false)
    .bind(Decimal::new(4000, 2))
    .execute(pool)
    .await?;

    println!("Seeded package");
    Ok(())
}

async fn seed_order(
    pool: &sqlx::PgPool,
    customer_id: Uuid,
    admin_id: Uuid,
) -> anyhow::Result<()> {
    let order_id = Uuid::parse_str(ORDER_ID)?;
    sqlx::query(
        r#"
        INSERT INTO orders (
            id, order_number, priority, customer_id,
            pickup_address_id, delivery_address_id, package_id, estimated_price
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(order_id)
    .bind("ORD-SEED-00000001")
    .bind(PriorityLevel::Standard)
    .bind(customer_id)
    .bind(Uuid::parse_str(PICKUP_ADDRESS_ID)?)
    .bind(Uuid::parse_str(DELIVERY_ADDRESS_ID)?)
    .bind(Uuid::parse_str(PACKAGE_ID)?)
    .bind(Decimal::new(1850, 2))
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO order_tracking (id, order_id, status, message, updated_by)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(Uuid::parse_str(TRACKING_ID)?)
    .bind(order_id)
    .bind(OrderStatus::Pending)
    .bind("Order received")
    .bind(admin_id)
    .execute(pool)
    .await?;

    println!("Seeded order");
    Ok(())
}

// Pricing rules have no natural key in the schema, so a blind re-insert
// would duplicate them on every run; check per package type instead.
async fn seed_pricing_rules(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let rules: [(PackageType, i64, i64, Option<i64>, i64); 7] = [
        (PackageType::Envelope, 450, 80, None, 150),
        (PackageType::SmallPackage, 600, 90, Some(40), 150),
        (PackageType::MediumPackage, 850, 110, Some(55), 150),
        (PackageType::LargePackage, 1200, 140, Some(75), 150),
        (PackageType::Fragile, 1000, 120, Some(60), 175),
        (PackageType::FoodDelivery, 500, 100, None, 200),
        (PackageType::Documents, 400, 70, None, 125),
    ];

    for (package_type, base, per_km, per_kg, multiplier) in rules {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pricing_rules WHERE package_type = $1)",
        )
        .bind(package_type)
        .fetch_one(pool)
        .await?;
        if exists {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO pricing_rules (
                id, package_type, base_price, price_per_km, price_per_kg, priority_multiplier
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(package_type)
        .bind(Decimal::new(base, 2))
        .bind(Decimal::new(per_km, 2))
        .bind(per_kg.map(|value| Decimal::new(value, 2)))
        .bind(Decimal::new(multiplier, 2))
        .execute(pool)
        .await?;
    }

    println!("Seeded pricing rules");
    Ok(())
}
