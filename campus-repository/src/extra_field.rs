use campus_error::{storage::StorageError, StorageResult};
use campus_models::{
    domain::prelude::{NewExtraField, UpdateExtraField},
    entities::prelude::*,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};
use validator::Validate;

/// Repository for custom field definitions
pub struct ExtraFieldRepository;

impl ExtraFieldRepository {
    /// Insert a custom field definition
    pub async fn create<C>(field: NewExtraField, db: &C) -> StorageResult<ExtraFieldModel>
    where
        C: ConnectionTrait,
    {
        field
            .validate()
            .map_err(|e| StorageError::InvalidInput(e.to_string()))?;
        Ok(field.into_active_model().insert(db).await?)
    }

    /// Apply a partial update to a definition
    pub async fn update<C>(field: UpdateExtraField, db: &C) -> StorageResult<ExtraFieldModel>
    where
        C: ConnectionTrait,
    {
        field
            .validate()
            .map_err(|e| StorageError::InvalidInput(e.to_string()))?;
        if Self::find_by_id(field.id, db).await?.is_none() {
            return Err(StorageError::EntityNotFound(format!(
                "extra field {}",
                field.id
            )));
        }
        Ok(field.into_active_model().update(db).await?)
    }

    /// Definition by id
    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<ExtraFieldModel>>
    where
        C: ConnectionTrait,
    {
        Ok(ExtraField::find_by_id(id).one(db).await?)
    }

    /// First definition using `variable`
    pub async fn find_by_variable<C>(
        variable: &str,
        db: &C,
    ) -> StorageResult<Option<ExtraFieldModel>>
    where
        C: ConnectionTrait,
    {
        Ok(ExtraField::find()
            .filter(ExtraFieldColumn::FieldVariable.eq(variable))
            .order_by_asc(ExtraFieldColumn::Id)
            .one(db)
            .await?)
    }

    /// All definitions by `field_order`; unordered ones last, ties by id
    pub async fn list<C>(db: &C) -> StorageResult<Vec<ExtraFieldModel>>
    where
        C: ConnectionTrait,
    {
        let mut fields = ExtraField::find()
            .order_by_asc(ExtraFieldColumn::Id)
            .all(db)
            .await?;
        fields.sort_by_key(|f| (f.field_order.is_none(), f.field_order, f.id));
        Ok(fields)
    }

    /// Delete a definition; returns whether a row was removed
    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        let result = ExtraField::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_models::enums::extra_field::ExtraFieldType;
    use campus_storage::init_memory_db;

    fn field(variable: &str, order: Option<i32>) -> NewExtraField {
        NewExtraField {
            field_type: ExtraFieldType::Text,
            field_variable: variable.into(),
            field_display_text: Some(variable.to_uppercase()),
            field_default_value: None,
            field_order: order,
            field_visible: true,
            field_changeable: false,
            field_filter: false,
        }
    }

    #[tokio::test]
    async fn create_round_trips_every_attribute() {
        let db = init_memory_db().await.unwrap();
        let created = ExtraFieldRepository::create(
            NewExtraField {
                field_type: ExtraFieldType::Select,
                field_default_value: Some("b".into()),
                field_filter: true,
                ..field("level", Some(2))
            },
            &db,
        )
        .await
        .unwrap();

        let loaded = ExtraFieldRepository::find_by_id(created.id, &db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.field_type, ExtraFieldType::Select);
        assert_eq!(loaded.field_variable, "level");
        assert_eq!(loaded.field_display_text.as_deref(), Some("LEVEL"));
        assert_eq!(loaded.field_default_value.as_deref(), Some("b"));
        assert_eq!(loaded.field_order, Some(2));
        assert!(loaded.field_visible);
        assert!(!loaded.field_changeable);
        assert!(loaded.field_filter);
    }

    #[tokio::test]
    async fn rejects_overlong_variable_before_insert() {
        let db = init_memory_db().await.unwrap();
        let err = ExtraFieldRepository::create(field(&"v".repeat(65), None), &db)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput(_)));
        assert!(ExtraFieldRepository::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_sorts_by_order_with_unordered_last() {
        let db = init_memory_db().await.unwrap();
        ExtraFieldRepository::create(field("c", None), &db)
            .await
            .unwrap();
        ExtraFieldRepository::create(field("b", Some(2)), &db)
            .await
            .unwrap();
        ExtraFieldRepository::create(field("a", Some(1)), &db)
            .await
            .unwrap();

        let names: Vec<String> = ExtraFieldRepository::list(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.field_variable)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_refreshes_timestamp_and_missing_id_fails() {
        let db = init_memory_db().await.unwrap();
        let created = ExtraFieldRepository::create(field("nick", Some(1)), &db)
            .await
            .unwrap();

        let updated = ExtraFieldRepository::update(
            UpdateExtraField {
                id: created.id,
                field_type: ExtraFieldType::Textarea,
                field_variable: "nickname".into(),
                field_display_text: None,
                field_default_value: None,
                field_order: None,
                field_visible: false,
                field_changeable: true,
                field_filter: false,
            },
            &db,
        )
        .await
        .unwrap();
        assert_eq!(updated.field_variable, "nickname");
        assert_eq!(updated.field_type, ExtraFieldType::Textarea);
        assert!(updated.tms >= created.tms);
        assert!(ExtraFieldRepository::find_by_variable("nickname", &db)
            .await
            .unwrap()
            .is_some());

        let missing = ExtraFieldRepository::update(
            UpdateExtraField {
                id: created.id + 100,
                ..UpdateExtraField {
                    id: 0,
                    field_type: ExtraFieldType::Text,
                    field_variable: "x".into(),
                    field_display_text: None,
                    field_default_value: None,
                    field_order: None,
                    field_visible: false,
                    field_changeable: false,
                    field_filter: false,
                }
            },
            &db,
        )
        .await
        .unwrap_err();
        assert!(matches!(missing, StorageError::EntityNotFound(_)));

        assert!(ExtraFieldRepository::delete(created.id, &db).await.unwrap());
        assert!(!ExtraFieldRepository::delete(created.id, &db).await.unwrap());
    }
}
