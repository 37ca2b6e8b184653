//! Property photo repository. Photos are stored but not audited.

use pis_core::entities::{NewPropertyPhoto, PropertyPhoto};

use super::{ensure_property, exists, insert_with_key};
use crate::error::DatabaseError;
use crate::service::UnitOfWork;
use crate::updates::ColumnValue;

fn row_to_photo(row: &libsql::Row) -> Result<PropertyPhoto, DatabaseError> {
    Ok(PropertyPhoto {
        photo_id: row.get::<i64>(0)?,
        property_yardi: row.get::<String>(1)?,
        photo_url: row.get::<String>(2)?,
        caption: row.get::<String>(3)?,
    })
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank URL, `NotFound` for an unknown property,
    /// `Conflict` for a taken explicit id.
    pub async fn create_photo(&self, new: NewPropertyPhoto) -> Result<PropertyPhoto, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        if let Some(id) = new.photo_id {
            if exists(self.conn(), "property_photos", "photo_id", id.into()).await? {
                return Err(DatabaseError::Conflict(format!("photo {id} already exists")));
            }
        }

        let explicit = new.photo_id;
        let mut photo = new.into_photo(explicit.unwrap_or_default());
        photo.photo_id = insert_with_key(
            self.conn(),
            "INSERT INTO property_photos (photo_id, property_yardi, photo_url, caption)
             VALUES (?1, ?2, ?3, ?4)",
            vec![
                explicit.to_sql(),
                photo.property_yardi.to_sql(),
                photo.photo_url.to_sql(),
                photo.caption.to_sql(),
            ],
            explicit,
        )
        .await?;
        Ok(photo)
    }

    pub async fn get_photo(&self, photo_id: i64) -> Result<PropertyPhoto, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT photo_id, property_yardi, photo_url, caption
                 FROM property_photos WHERE photo_id = ?1",
                [photo_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("photo", photo_id))?;
        row_to_photo(&row)
    }

    pub async fn list_photos(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<PropertyPhoto>, DatabaseError> {
        let mut rows = match property_yardi {
            Some(yardi) => {
                self.conn()
                    .query(
                        "SELECT photo_id, property_yardi, photo_url, caption
                         FROM property_photos WHERE property_yardi = ?1 ORDER BY photo_id",
                        [yardi],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(
                        "SELECT photo_id, property_yardi, photo_url, caption
                         FROM property_photos ORDER BY photo_id",
                        (),
                    )
                    .await?
            }
        };
        let mut photos = Vec::new();
        while let Some(row) = rows.next().await? {
            photos.push(row_to_photo(&row)?);
        }
        Ok(photos)
    }

    /// # Errors
    ///
    /// `NotFound` if the photo does not exist.
    pub async fn delete_photo(&self, photo_id: i64) -> Result<(), DatabaseError> {
        let removed = self
            .conn()
            .execute("DELETE FROM property_photos WHERE photo_id = ?1", [photo_id])
            .await?;
        if removed == 0 {
            return Err(DatabaseError::not_found("photo", photo_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{history_rows, seed_property, test_uow};
    use pis_core::entities::NewPropertyPhoto;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn photos_are_not_audited() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let before = history_rows(&uow).await.len();

        let photo = uow
            .create_photo(NewPropertyPhoto {
                property_yardi: "P1".into(),
                photo_url: "https://img/1.jpg".into(),
                ..NewPropertyPhoto::default()
            })
            .await
            .unwrap();
        assert_eq!(uow.list_photos(Some("P1")).await.unwrap(), vec![photo.clone()]);
        uow.delete_photo(photo.photo_id).await.unwrap();

        assert_eq!(history_rows(&uow).await.len(), before);
        assert!(uow.delete_photo(photo.photo_id).await.is_err());
    }
}
