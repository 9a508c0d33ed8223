use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (accounts, listings, ledger)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE profiles (
                id                   TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                full_name            TEXT NOT NULL,
                role                 TEXT NOT NULL,
                phone                TEXT,
                location             TEXT,
                age                  INTEGER,
                language_preference  TEXT NOT NULL DEFAULT 'en',
                health_preferences   TEXT NOT NULL DEFAULT '{}',
                created_at           TEXT NOT NULL,
                updated_at           TEXT NOT NULL
            );

            CREATE TABLE products (
                id            TEXT PRIMARY KEY,
                farmer_id     TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                millet_type   TEXT NOT NULL,
                quantity_kg   REAL NOT NULL,
                price_per_kg  REAL NOT NULL,
                description   TEXT,
                status        TEXT NOT NULL DEFAULT 'available',
                created_at    TEXT NOT NULL
            );

            CREATE INDEX idx_products_farmer ON products(farmer_id, created_at);
            CREATE INDEX idx_products_status ON products(status, created_at);

            -- No UNIQUE(consumer_id, farmer_id): repeat adoptions are stored as-is.
            CREATE TABLE farmer_adoptions (
                id           TEXT PRIMARY KEY,
                consumer_id  TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                farmer_id    TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                status       TEXT NOT NULL DEFAULT 'active',
                created_at   TEXT NOT NULL
            );

            CREATE INDEX idx_adoptions_consumer ON farmer_adoptions(consumer_id, status);

            CREATE TABLE rewards (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                points       INTEGER NOT NULL,
                earned_from  TEXT NOT NULL,
                description  TEXT,
                created_at   TEXT NOT NULL
            );

            CREATE INDEX idx_rewards_user ON rewards(user_id, created_at);

            CREATE TABLE notifications (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                title       TEXT NOT NULL,
                message     TEXT NOT NULL,
                type        TEXT NOT NULL,
                is_read     INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_notifications_user ON notifications(user_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    if version < 2 {
        info!("Running migration v2 (price predictions, crop advisories)");
        conn.execute_batch(
            "
            CREATE TABLE price_predictions (
                id               TEXT PRIMARY KEY,
                millet_type      TEXT NOT NULL,
                predicted_price  REAL NOT NULL,
                prediction_date  TEXT NOT NULL,
                confidence       REAL NOT NULL
            );

            CREATE TABLE crop_advisories (
                id             TEXT PRIMARY KEY,
                farmer_id      TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                millet_type    TEXT NOT NULL,
                region         TEXT NOT NULL,
                soil_type      TEXT NOT NULL,
                season         TEXT NOT NULL,
                advisory_text  TEXT NOT NULL,
                created_at     TEXT NOT NULL
            );

            CREATE INDEX idx_advisories_farmer ON crop_advisories(farmer_id, created_at);

            -- Seed market outlook shown on the farmer dashboard
            INSERT OR IGNORE INTO price_predictions (id, millet_type, predicted_price, prediction_date, confidence) VALUES
                ('00000000-0000-0000-0001-000000000001', 'Foxtail Millet',  65.0, '2026-10-01', 0.82),
                ('00000000-0000-0000-0001-000000000002', 'Pearl Millet',    72.0, '2026-10-01', 0.78),
                ('00000000-0000-0000-0001-000000000003', 'Finger Millet',   58.5, '2026-09-24', 0.75),
                ('00000000-0000-0000-0001-000000000004', 'Kodo Millet',     88.0, '2026-09-24', 0.70),
                ('00000000-0000-0000-0001-000000000005', 'Little Millet',   92.0, '2026-09-17', 0.68),
                ('00000000-0000-0000-0001-000000000006', 'Sorghum',         41.0, '2026-09-17', 0.80);

            INSERT INTO schema_version (version) VALUES (2);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
