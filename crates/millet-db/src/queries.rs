use crate::Database;
use crate::models::{
    AdoptionRow, AdvisoryRow, FarmerRow, NotificationRow, PredictionRow, ProductRow, ProfileRow,
    RewardRow, UserRow,
};
use anyhow::Result;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

const PROFILE_COLUMNS: &str = "id, full_name, role, phone, location, age, language_preference, \
     health_preferences, created_at, updated_at";
const PRODUCT_COLUMNS: &str =
    "id, farmer_id, millet_type, quantity_kg, price_per_kg, description, status, created_at";
const ADVISORY_COLUMNS: &str =
    "id, farmer_id, millet_type, region, soil_type, season, advisory_text, created_at";

impl Database {
    // -- Accounts --

    /// Insert the auth user and its profile in one transaction.
    /// Returns false, writing nothing, when the email is already registered.
    pub fn create_account(&self, user: &UserRow, profile: &ProfileRow) -> Result<bool> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            if let Err(e) = tx.execute(
                "INSERT INTO users (id, email, password, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![user.id, user.email, user.password, user.created_at],
            ) {
                if is_unique_violation(&e, "users.email") {
                    return Ok(false);
                }
                return Err(e.into());
            }
            insert_profile(&tx, profile)?;
            tx.commit()?;
            Ok(true)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    // -- Profiles --

    pub fn get_profile(&self, id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                    [id],
                    profile_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Overwrite every mutable column of an existing profile.
    /// Returns false when no profile has that id.
    pub fn update_profile(&self, profile: &ProfileRow) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE profiles SET full_name = ?2, phone = ?3, location = ?4, age = ?5,
                     language_preference = ?6, health_preferences = ?7, updated_at = ?8
                 WHERE id = ?1",
                params![
                    profile.id,
                    profile.full_name,
                    profile.phone,
                    profile.location,
                    profile.age,
                    profile.language_preference,
                    profile.health_preferences,
                    profile.updated_at,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    /// Public projection of farmer profiles. Ids that are unknown or belong
    /// to consumers are skipped.
    pub fn get_farmers(&self, ids: &[String]) -> Result<Vec<FarmerRow>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT id, full_name, location FROM profiles
                 WHERE role = 'farmer' AND id IN ({})",
                placeholders.join(", ")
            );

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(ids.iter()), |row| {
                    Ok(FarmerRow {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        location: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Products --

    pub fn insert_product(&self, product: &ProductRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO products ({PRODUCT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    product.id,
                    product.farmer_id,
                    product.millet_type,
                    product.quantity_kg,
                    product.price_per_kg,
                    product.description,
                    product.status,
                    product.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_product(&self, id: &str) -> Result<Option<ProductRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
                    [id],
                    product_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// A farmer's own listings, newest first.
    pub fn get_products_by_farmer(&self, farmer_id: &str) -> Result<Vec<ProductRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE farmer_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([farmer_id], product_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Listings across all farmers with the given status, newest first.
    pub fn get_products_by_status(&self, status: &str) -> Result<Vec<ProductRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE status = ?1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([status], product_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn set_product_status(&self, id: &str, status: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE products SET status = ?2 WHERE id = ?1",
                params![id, status],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_product(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })
    }

    // -- Adoptions --

    pub fn insert_adoption(&self, adoption: &AdoptionRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO farmer_adoptions (id, consumer_id, farmer_id, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    adoption.id,
                    adoption.consumer_id,
                    adoption.farmer_id,
                    adoption.status,
                    adoption.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_adoptions(&self, consumer_id: &str, status: &str) -> Result<Vec<AdoptionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, consumer_id, farmer_id, status, created_at FROM farmer_adoptions
                 WHERE consumer_id = ?1 AND status = ?2
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map(params![consumer_id, status], |row| {
                    Ok(AdoptionRow {
                        id: row.get(0)?,
                        consumer_id: row.get(1)?,
                        farmer_id: row.get(2)?,
                        status: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Rewards --

    pub fn insert_reward(&self, reward: &RewardRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO rewards (id, user_id, points, earned_from, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    reward.id,
                    reward.user_id,
                    reward.points,
                    reward.earned_from,
                    reward.description,
                    reward.created_at,
                ],
            )?;
            Ok(())
        })
    }

    /// The whole ledger for a user, newest first. Not paginated.
    pub fn get_rewards(&self, user_id: &str) -> Result<Vec<RewardRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, points, earned_from, description, created_at FROM rewards
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(RewardRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        points: row.get(2)?,
                        earned_from: row.get(3)?,
                        description: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Notifications --

    pub fn insert_notification(&self, n: &NotificationRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notifications (id, user_id, title, message, type, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![n.id, n.user_id, n.title, n.message, n.kind, n.is_read, n.created_at],
            )?;
            Ok(())
        })
    }

    pub fn get_notifications(&self, user_id: &str, limit: u32) -> Result<Vec<NotificationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, message, type, is_read, created_at FROM notifications
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2",
            )?;
            let rows = stmt
                .query_map(params![user_id, limit], |row| {
                    Ok(NotificationRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        title: row.get(2)?,
                        message: row.get(3)?,
                        kind: row.get(4)?,
                        is_read: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Market insights --

    pub fn get_price_predictions(&self, limit: u32) -> Result<Vec<PredictionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, millet_type, predicted_price, prediction_date, confidence
                 FROM price_predictions
                 ORDER BY prediction_date DESC, rowid ASC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map([limit], |row| {
                    Ok(PredictionRow {
                        id: row.get(0)?,
                        millet_type: row.get(1)?,
                        predicted_price: row.get(2)?,
                        prediction_date: row.get(3)?,
                        confidence: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn insert_advisory(&self, advisory: &AdvisoryRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO crop_advisories ({ADVISORY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    advisory.id,
                    advisory.farmer_id,
                    advisory.millet_type,
                    advisory.region,
                    advisory.soil_type,
                    advisory.season,
                    advisory.advisory_text,
                    advisory.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_advisories(&self, farmer_id: &str, limit: u32) -> Result<Vec<AdvisoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ADVISORY_COLUMNS} FROM crop_advisories
                 WHERE farmer_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2"
            ))?;
            let rows = stmt
                .query_map(params![farmer_id, limit], |row| {
                    Ok(AdvisoryRow {
                        id: row.get(0)?,
                        farmer_id: row.get(1)?,
                        millet_type: row.get(2)?,
                        region: row.get(3)?,
                        soil_type: row.get(4)?,
                        season: row.get(5)?,
                        advisory_text: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, email, password, created_at FROM users WHERE {column} = ?1"
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn insert_profile(conn: &Connection, profile: &ProfileRow) -> Result<()> {
    conn.execute(
        &format!("INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
        params![
            profile.id,
            profile.full_name,
            profile.role,
            profile.phone,
            profile.location,
            profile.age,
            profile.language_preference,
            profile.health_preferences,
            profile.created_at,
            profile.updated_at,
        ],
    )?;
    Ok(())
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<ProfileRow> {
    Ok(ProfileRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        role: row.get(2)?,
        phone: row.get(3)?,
        location: row.get(4)?,
        age: row.get(5)?,
        language_preference: row.get(6)?,
        health_preferences: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<ProductRow> {
    Ok(ProductRow {
        id: row.get(0)?,
        farmer_id: row.get(1)?,
        millet_type: row.get(2)?,
        quantity_kg: row.get(3)?,
        price_per_kg: row.get(4)?,
        description: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn is_unique_violation(e: &rusqlite::Error, column: &str) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, Some(msg))
            if err.code == ErrorCode::ConstraintViolation && msg.contains(column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::now;

    fn id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn account(db: &Database, email: &str, role: &str) -> String {
        let user_id = id();
        let ts = now();
        let created = db.create_account(
            &UserRow {
                id: user_id.clone(),
                email: email.to_string(),
                password: "hash".to_string(),
                created_at: ts.clone(),
            },
            &ProfileRow {
                id: user_id.clone(),
                full_name: format!("{role} {email}"),
                role: role.to_string(),
                phone: None,
                location: Some("Anantapur".to_string()),
                age: Some(34),
                language_preference: "te".to_string(),
                health_preferences: "{}".to_string(),
                created_at: ts.clone(),
                updated_at: ts,
            },
        )
        .unwrap();
        assert!(created);
        user_id
    }

    fn product(farmer_id: &str, millet: &str) -> ProductRow {
        ProductRow {
            id: id(),
            farmer_id: farmer_id.to_string(),
            millet_type: millet.to_string(),
            quantity_kg: 10.0,
            price_per_kg: 65.0,
            description: Some("Sun dried".to_string()),
            status: "available".to_string(),
            created_at: now(),
        }
    }

    #[test]
    fn account_creation_is_visible_and_unique() {
        let db = Database::open_in_memory().unwrap();
        let uid = account(&db, "ravi@example.com", "farmer");

        let user = db.get_user_by_email("ravi@example.com").unwrap().unwrap();
        assert_eq!(user.id, uid);
        assert!(db.get_user_by_id(&uid).unwrap().is_some());
        assert_eq!(db.get_profile(&uid).unwrap().unwrap().role, "farmer");

        // Same email again is refused and leaves no orphan profile.
        let ts = now();
        let other = id();
        let dup = db.create_account(
            &UserRow {
                id: other.clone(),
                email: "ravi@example.com".to_string(),
                password: "x".to_string(),
                created_at: ts.clone(),
            },
            &ProfileRow {
                id: other.clone(),
                full_name: "Dup".to_string(),
                role: "consumer".to_string(),
                phone: None,
                location: None,
                age: None,
                language_preference: "en".to_string(),
                health_preferences: "{}".to_string(),
                created_at: ts.clone(),
                updated_at: ts,
            },
        );
        assert!(!dup.unwrap());
        assert!(db.get_profile(&other).unwrap().is_none());
        assert!(db.get_user_by_id(&other).unwrap().is_none());
    }

    #[test]
    fn products_list_newest_first_and_filter_by_status() {
        let db = Database::open_in_memory().unwrap();
        let farmer = account(&db, "f@example.com", "farmer");

        let first = product(&farmer, "Foxtail Millet");
        let second = product(&farmer, "Kodo Millet");
        db.insert_product(&first).unwrap();
        db.insert_product(&second).unwrap();

        let mine = db.get_products_by_farmer(&farmer).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);

        assert!(db.set_product_status(&first.id, "unavailable").unwrap());
        let available = db.get_products_by_status("available").unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, second.id);

        assert!(db.delete_product(&second.id).unwrap());
        assert!(!db.delete_product(&second.id).unwrap());
        assert!(!db.set_product_status(&second.id, "available").unwrap());
        assert!(db.get_product(&second.id).unwrap().is_none());
    }

    #[test]
    fn duplicate_adoptions_are_stored() {
        let db = Database::open_in_memory().unwrap();
        let farmer = account(&db, "f@example.com", "farmer");
        let consumer = account(&db, "c@example.com", "consumer");

        for _ in 0..2 {
            db.insert_adoption(&AdoptionRow {
                id: id(),
                consumer_id: consumer.clone(),
                farmer_id: farmer.clone(),
                status: "active".to_string(),
                created_at: now(),
            })
            .unwrap();
        }

        assert_eq!(db.get_adoptions(&consumer, "active").unwrap().len(), 2);
        assert!(db.get_adoptions(&consumer, "inactive").unwrap().is_empty());
    }

    #[test]
    fn farmers_lookup_skips_consumers() {
        let db = Database::open_in_memory().unwrap();
        let farmer = account(&db, "f@example.com", "farmer");
        let consumer = account(&db, "c@example.com", "consumer");

        let rows = db.get_farmers(&[farmer.clone(), consumer]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, farmer);
        assert!(db.get_farmers(&[]).unwrap().is_empty());
    }

    #[test]
    fn notifications_respect_limit() {
        let db = Database::open_in_memory().unwrap();
        let user = account(&db, "f@example.com", "farmer");

        for i in 0..7 {
            db.insert_notification(&NotificationRow {
                id: id(),
                user_id: user.clone(),
                title: format!("Alert {i}"),
                message: "Check your field".to_string(),
                kind: "alert".to_string(),
                is_read: i % 2 == 0,
                created_at: now(),
            })
            .unwrap();
        }

        let rows = db.get_notifications(&user, 5).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].title, "Alert 6");
    }

    #[test]
    fn seeded_predictions_come_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let rows = db.get_price_predictions(5).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.windows(2).all(|w| w[0].prediction_date >= w[1].prediction_date));
    }

    #[test]
    fn profile_update_overwrites_columns() {
        let db = Database::open_in_memory().unwrap();
        let uid = account(&db, "c@example.com", "consumer");

        let mut row = db.get_profile(&uid).unwrap().unwrap();
        row.age = Some(61);
        row.language_preference = "ta".to_string();
        row.updated_at = now();
        assert!(db.update_profile(&row).unwrap());

        let stored = db.get_profile(&uid).unwrap().unwrap();
        assert_eq!(stored.age, Some(61));
        assert_eq!(stored.language_preference, "ta");
    }
}
