use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use sqlx::PgPool;
use tracing::{error, info, warn};

use shared_config::AppConfig;
use uuid::Uuid;

/// Ordered, versioned migration list. Every statement uses IF NOT EXISTS
/// semantics so a re-run against a database that predates the version
/// ledger is still safe.
pub const MIGRATIONS: &[(i32, &str)] = &[
    (1, BASE_SCHEMA),
    (2, VIDEOS_EVOLUTION),
];

const BASE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS clinics (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS doctors (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    clinic_id UUID NOT NULL REFERENCES clinics(id) ON DELETE CASCADE,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS appointments (
    id UUID PRIMARY KEY,
    doctor_id UUID NOT NULL REFERENCES doctors(id) ON DELETE CASCADE,
    clinic_id UUID NOT NULL,
    doctor_name TEXT NOT NULL,
    appointment_date DATE NOT NULL,
    time_slot TEXT NOT NULL,
    patient_name TEXT NOT NULL,
    patient_phone TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'confirmed',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_active_slot
    ON appointments (doctor_id, appointment_date, time_slot)
    WHERE status <> 'cancelled';

CREATE TABLE IF NOT EXISTS treatments (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    short_description TEXT,
    long_description TEXT,
    content JSONB,
    image TEXT,
    slug TEXT NOT NULL UNIQUE,
    seo_title TEXT,
    seo_description TEXT,
    is_featured BOOLEAN NOT NULL DEFAULT FALSE,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS branches (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    image TEXT,
    address TEXT,
    phone TEXT,
    email TEXT,
    gallery JSONB NOT NULL DEFAULT '[]'::jsonb,
    latitude DOUBLE PRECISION,
    longitude DOUBLE PRECISION,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS partners (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    logo TEXT,
    website TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS faqs (
    id UUID PRIMARY KEY,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS timeline_items (
    id UUID PRIMARY KEY,
    year TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS prices (
    id UUID PRIMARY KEY,
    category TEXT NOT NULL,
    name TEXT NOT NULL,
    amount TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS feedbacks (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    comment TEXT NOT NULL,
    rating INTEGER,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS videos (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    thumbnail TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS admins (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

// The videos table shape evolved after launch; the columns arrive as an
// additive migration so older databases pick them up on the next boot.
const VIDEOS_EVOLUTION: &str = r#"
ALTER TABLE videos ADD COLUMN IF NOT EXISTS video_id TEXT;
ALTER TABLE videos ADD COLUMN IF NOT EXISTS long_description TEXT;
"#;

/// Run every pending migration, recording applied versions in
/// `schema_migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    let applied: Vec<i32> = sqlx::query_scalar("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }

        sqlx::raw_sql(sql)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("migration {} failed: {}", version, e))?;

        sqlx::query("INSERT INTO schema_migrations (version) VALUES ($1)")
            .bind(version)
            .execute(pool)
            .await?;

        info!("Applied schema migration {}", version);
    }

    Ok(())
}

/// Seed exactly one administrative credential when the admins table is empty.
/// The password is stored as an argon2 hash, never in plaintext.
pub async fn seed_admin(pool: &PgPool, config: &AppConfig) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(config.admin_bootstrap_password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash bootstrap password: {}", e))?
        .to_string();

    sqlx::query("INSERT INTO admins (id, username, password_hash) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(&config.admin_bootstrap_username)
        .bind(&hash)
        .execute(pool)
        .await?;

    info!(
        "Seeded bootstrap admin credential {:?}",
        config.admin_bootstrap_username
    );
    Ok(())
}

/// Boot-time schema initialization. Failures are logged but never abort the
/// process; a partially initialized schema surfaces as request-time errors
/// instead.
pub async fn initialize_schema(pool: &PgPool, config: &AppConfig) {
    if let Err(e) = run_migrations(pool).await {
        error!("Schema initialization failed: {}", e);
        warn!("Continuing with a possibly partially-initialized schema");
        return;
    }

    if let Err(e) = seed_admin(pool, config).await {
        error!("Admin seeding failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_versions_are_strictly_increasing() {
        for pair in MIGRATIONS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "versions must be ordered and unique");
        }
    }

    #[test]
    fn base_schema_covers_every_entity_table() {
        let (_, base) = MIGRATIONS[0];
        for table in [
            "clinics",
            "doctors",
            "appointments",
            "treatments",
            "branches",
            "partners",
            "faqs",
            "timeline_items",
            "prices",
            "feedbacks",
            "videos",
            "admins",
        ] {
            assert!(
                base.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "missing table {}",
                table
            );
        }
    }

    #[test]
    fn videos_evolution_is_additive() {
        let (_, sql) = MIGRATIONS[1];
        assert!(sql.contains("ADD COLUMN IF NOT EXISTS video_id"));
        assert!(sql.contains("ADD COLUMN IF NOT EXISTS long_description"));
    }
}
