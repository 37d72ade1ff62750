//! Insert and list operations on the `user_sightings` table.

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};
use ticksight_database_models::{NewUserSighting, UserSightingRow};
use ticksight_sighting_models::SightingRecord;

use crate::DbError;
use crate::normalise::normalise_row;

/// Inserts one user sighting.
///
/// The severity column is derived from the species and `created_at` is the
/// current UTC time. Returns whether a row was written.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails.
pub async fn create_sighting(db: &dyn Database, new: &NewUserSighting) -> Result<bool, DbError> {
    let now = chrono::Utc::now().to_rfc3339();

    let written = db
        .exec_raw_params(
            "INSERT INTO user_sightings (
                sighting_date, sighting_time, location, species,
                severity, description, image_path, created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            &[
                DatabaseValue::String(new.date.clone()),
                DatabaseValue::String(new.time.clone()),
                DatabaseValue::String(new.location.clone()),
                DatabaseValue::String(new.species.clone()),
                DatabaseValue::String(new.severity().to_string()),
                optional_string(new.description.as_deref()),
                optional_string(new.image_path.as_deref()),
                DatabaseValue::String(now),
            ],
        )
        .await?;

    if written > 0 {
        log::info!(
            "Stored user sighting: {} in {} on {} {}",
            new.species,
            new.location,
            new.date,
            new.time
        );
    }

    Ok(written > 0)
}

/// Returns every stored sighting, newest first by sighting date then time.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row has no id.
pub async fn list_sightings(db: &dyn Database) -> Result<Vec<UserSightingRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, sighting_date, sighting_time, location, species,
                    severity, description, image_path, created_at
             FROM user_sightings
             ORDER BY sighting_date DESC, sighting_time DESC, id DESC",
            &[],
        )
        .await?;

    let mut sightings = Vec::with_capacity(rows.len());
    for row in &rows {
        let id: i64 = row.to_value("id").map_err(|e| DbError::Conversion {
            message: format!("Failed to parse user sighting id: {e}"),
        })?;

        sightings.push(UserSightingRow {
            id,
            sighting_date: row.to_value("sighting_date").unwrap_or(None),
            sighting_time: row.to_value("sighting_time").unwrap_or(None),
            location: row.to_value("location").unwrap_or(None),
            species: row.to_value("species").unwrap_or(None),
            severity: row.to_value("severity").unwrap_or(None),
            description: row.to_value("description").unwrap_or(None),
            image_path: row.to_value("image_path").unwrap_or(None),
            created_at: row.to_value("created_at").unwrap_or(None),
        });
    }

    Ok(sightings)
}

/// Returns every stored sighting reshaped into the shared record layout,
/// in the same order as [`list_sightings`].
///
/// # Errors
///
/// Returns [`DbError`] if the underlying query fails.
pub async fn list_sightings_normalised(db: &dyn Database) -> Result<Vec<SightingRecord>, DbError> {
    let rows = list_sightings(db).await?;
    Ok(rows.into_iter().map(normalise_row).collect())
}

fn optional_string(value: Option<&str>) -> DatabaseValue {
    value
        .filter(|v| !v.is_empty())
        .map_or(DatabaseValue::Null, |v| DatabaseValue::String(v.to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use ticksight_sighting_models::SightingOrigin;

    use super::*;
    use crate::open_db;

    fn sighting(date: &str, time: &str, species: &str) -> NewUserSighting {
        NewUserSighting {
            date: date.to_string(),
            time: time.to_string(),
            location: "Leeds".to_string(),
            species: species.to_string(),
            description: Some("On the dog after a walk".to_string()),
            image_path: None,
        }
    }

    async fn temp_db(dir: &Path) -> Box<dyn Database> {
        open_db(&dir.join("nested").join("sightings.db")).await.unwrap()
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(dir.path()).await;
        assert!(list_sightings(db.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(dir.path()).await;

        for (date, time) in [
            ("2025-01-10", "09:00"),
            ("2025-03-02", "08:15"),
            ("2025-03-02", "17:45"),
        ] {
            assert!(
                create_sighting(db.as_ref(), &sighting(date, time, "Marsh tick"))
                    .await
                    .unwrap()
            );
        }

        let rows = list_sightings(db.as_ref()).await.unwrap();
        let order: Vec<(Option<&str>, Option<&str>)> = rows
            .iter()
            .map(|r| (r.sighting_date.as_deref(), r.sighting_time.as_deref()))
            .collect();
        assert_eq!(
            order,
            vec![
                (Some("2025-03-02"), Some("17:45")),
                (Some("2025-03-02"), Some("08:15")),
                (Some("2025-01-10"), Some("09:00")),
            ]
        );
        assert_eq!(rows[0].severity.as_deref(), Some("medium"));
        assert!(rows[0].created_at.is_some());
    }

    #[tokio::test]
    async fn normalised_rows_are_user_records() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(dir.path()).await;

        let mut with_photo = sighting("2025-05-01", "12:00", "Tree-hole tick");
        with_photo.image_path = Some("images/uploads/sighting_1_abcd1234.jpg".to_string());
        create_sighting(db.as_ref(), &with_photo).await.unwrap();
        create_sighting(db.as_ref(), &sighting("2025-04-01", "12:00", "Deer tick"))
            .await
            .unwrap();

        let records = list_sightings_normalised(db.as_ref()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.source == SightingOrigin::User));

        assert_eq!(records[0].date.as_deref(), Some("2025-05-01T12:00"));
        assert_eq!(records[0].latin_name.as_deref(), Some("Dermacentor frontalis"));
        assert_eq!(
            records[0].image_path.as_deref(),
            Some("images/uploads/sighting_1_abcd1234.jpg")
        );

        assert!(records[1].latin_name.is_none());
        assert!(records[1].image_path.is_none());
    }

    #[tokio::test]
    async fn empty_description_is_stored_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(dir.path()).await;

        let mut new = sighting("2025-05-01", "12:00", "Marsh tick");
        new.description = Some(String::new());
        create_sighting(db.as_ref(), &new).await.unwrap();

        let rows = list_sightings(db.as_ref()).await.unwrap();
        assert!(rows[0].description.is_none());
    }
}
