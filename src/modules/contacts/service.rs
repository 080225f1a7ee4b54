use anyhow::Context;
use chrono::{Days, NaiveDate};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::contacts::model::{Contact, CreateContactRequest, UpdateContactRequest};
use crate::utils::errors::AppError;

const CONTACT_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone_number, \
                               birthday, additional_info, created_at, updated_at";

pub struct ContactService;

impl ContactService {
    #[instrument(skip(db, dto))]
    pub async fn create_contact(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateContactRequest,
    ) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts
                 (user_id, first_name, last_name, email, phone_number, birthday, additional_info)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(user_id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(dto.birthday)
        .bind(&dto.additional_info)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Contact with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(contact)
    }

    #[instrument(skip(db))]
    pub async fn get_contacts(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Contact>, i64), AppError> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {}
             FROM contacts
             WHERE user_id = $1
             ORDER BY last_name, first_name
             LIMIT $2 OFFSET $3",
            CONTACT_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch contacts")
        .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await
            .context("Failed to count contacts")
            .map_err(AppError::database)?;

        Ok((contacts, total))
    }

    #[instrument(skip(db))]
    pub async fn get_contact(db: &PgPool, id: Uuid, user_id: Uuid) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts WHERE id = $1 AND user_id = $2",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch contact")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Contact not found")))?;

        Ok(contact)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_contact(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        dto: UpdateContactRequest,
    ) -> Result<Contact, AppError> {
        let existing = Self::get_contact(db, id, user_id).await?;

        let email = dto.email.unwrap_or(existing.email);

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts
             SET first_name = $1, last_name = $2, email = $3, phone_number = $4,
                 birthday = $5, additional_info = $6, updated_at = NOW()
             WHERE id = $7 AND user_id = $8
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(dto.first_name.unwrap_or(existing.first_name))
        .bind(dto.last_name.unwrap_or(existing.last_name))
        .bind(&email)
        .bind(dto.phone_number.unwrap_or(existing.phone_number))
        .bind(dto.birthday.unwrap_or(existing.birthday))
        .bind(dto.additional_info.or(existing.additional_info))
        .bind(id)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Contact with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(contact)
    }

    #[instrument(skip(db))]
    pub async fn delete_contact(db: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to delete contact")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Contact not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn search_contacts(
        db: &PgPool,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<Contact>, AppError> {
        let pattern = format!("%{}%", query);

        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {}
             FROM contacts
             WHERE user_id = $1
               AND (first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
             ORDER BY last_name, first_name",
            CONTACT_COLUMNS
        ))
        .bind(user_id)
        .bind(&pattern)
        .fetch_all(db)
        .await
        .context("Failed to search contacts")
        .map_err(AppError::database)?;

        Ok(contacts)
    }

    #[instrument(skip(db))]
    pub async fn upcoming_birthdays(db: &PgPool, user_id: Uuid) -> Result<Vec<Contact>, AppError> {
        let today = chrono::Utc::now().date_naive();
        let window = birthday_window(today, 7);

        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {}
             FROM contacts
             WHERE user_id = $1 AND to_char(birthday, 'MM-DD') = ANY($2)
             ORDER BY to_char(birthday, 'MM-DD')",
            CONTACT_COLUMNS
        ))
        .bind(user_id)
        .bind(&window)
        .fetch_all(db)
        .await
        .context("Failed to fetch upcoming birthdays")
        .map_err(AppError::database)?;

        Ok(contacts)
    }
}

/// Month-day keys for today through `days` days ahead. Matching on the
/// month-day projection keeps the query correct across a year boundary.
fn birthday_window(start: NaiveDate, days: u64) -> Vec<String> {
    (0..=days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| date.format("%m-%d").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birthday_window_covers_eight_days() {
        let window = birthday_window(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), 7);
        assert_eq!(window.len(), 8);
        assert_eq!(window.first().unwrap(), "03-10");
        assert_eq!(window.last().unwrap(), "03-17");
    }

    #[test]
    fn birthday_window_wraps_year_boundary() {
        let window = birthday_window(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap(), 7);
        assert!(window.contains(&"12-31".to_string()));
        assert!(window.contains(&"01-01".to_string()));
        assert!(window.contains(&"01-05".to_string()));
    }
}
