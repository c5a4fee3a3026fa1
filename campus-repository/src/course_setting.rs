use campus_error::StorageResult;
use campus_models::{domain::prelude::NewCourseSetting, entities::prelude::*};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QueryTrait, Select,
};

/// Repository for `c_course_setting` rows
pub struct CourseSettingRepository;

impl CourseSettingRepository {
    fn by_key(c_id: i32, variable: &str, subkey: Option<&str>) -> Select<CourseSetting> {
        CourseSetting::find()
            .filter(CourseSettingColumn::CId.eq(c_id))
            .filter(CourseSettingColumn::Variable.eq(variable))
            .apply_if(subkey, |q, subkey| {
                q.filter(CourseSettingColumn::Subkey.eq(subkey))
            })
    }

    /// Whether a row exists for the key; `subkey = None` matches any subkey
    pub async fn exists<C>(
        c_id: i32,
        variable: &str,
        subkey: Option<&str>,
        db: &C,
    ) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Self::by_key(c_id, variable, subkey).count(db).await? > 0)
    }

    /// First row matching the key; `subkey = None` matches any subkey
    pub async fn find<C>(
        c_id: i32,
        variable: &str,
        subkey: Option<&str>,
        db: &C,
    ) -> StorageResult<Option<CourseSettingModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::by_key(c_id, variable, subkey)
            .order_by_asc(CourseSettingColumn::Id)
            .one(db)
            .await?)
    }

    /// Every setting row of a course
    pub async fn list_for_course<C>(c_id: i32, db: &C) -> StorageResult<Vec<CourseSettingModel>>
    where
        C: ConnectionTrait,
    {
        Ok(CourseSetting::find()
            .filter(CourseSettingColumn::CId.eq(c_id))
            .order_by_asc(CourseSettingColumn::Id)
            .all(db)
            .await?)
    }

    /// Insert one course setting row
    pub async fn insert<C>(setting: NewCourseSetting, db: &C) -> StorageResult<CourseSettingModel>
    where
        C: ConnectionTrait,
    {
        Ok(setting.into_active_model().insert(db).await?)
    }

    /// Set the value of every row matching the key; returns affected rows
    pub async fn update_value<C>(
        c_id: i32,
        variable: &str,
        subkey: Option<&str>,
        value: &str,
        db: &C,
    ) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = CourseSetting::update_many()
            .col_expr(CourseSettingColumn::Value, Expr::value(value))
            .filter(CourseSettingColumn::CId.eq(c_id))
            .filter(CourseSettingColumn::Variable.eq(variable))
            .apply_if(subkey, |q, subkey| {
                q.filter(CourseSettingColumn::Subkey.eq(subkey))
            })
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Delete every row of the course stored under `variable`
    pub async fn delete_by_variable<C>(c_id: i32, variable: &str, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = CourseSetting::delete_many()
            .filter(CourseSettingColumn::CId.eq(c_id))
            .filter(CourseSettingColumn::Variable.eq(variable))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CourseRepository;
    use campus_models::domain::prelude::NewCourse;
    use campus_storage::init_memory_db;

    fn setting(c_id: i32, variable: &str, subkey: &str) -> NewCourseSetting {
        NewCourseSetting {
            c_id,
            variable: variable.into(),
            subkey: Some(subkey.into()),
            setting_type: "textfield".into(),
            category: "plugins".into(),
            value: Some("1".into()),
        }
    }

    #[tokio::test]
    async fn key_matching_honours_optional_subkey() {
        let db = init_memory_db().await.unwrap();
        let course = CourseRepository::create(
            NewCourse {
                code: "MATH".into(),
                title: "Maths".into(),
            },
            &db,
        )
        .await
        .unwrap();
        assert_eq!(
            CourseRepository::list_ids(&db).await.unwrap(),
            vec![course.id]
        );

        CourseSettingRepository::insert(setting(course.id, "bbb", "bbb_record"), &db)
            .await
            .unwrap();

        assert!(
            CourseSettingRepository::exists(course.id, "bbb", None, &db)
                .await
                .unwrap()
        );
        assert!(
            !CourseSettingRepository::exists(course.id, "bbb", Some("other"), &db)
                .await
                .unwrap()
        );

        let affected = CourseSettingRepository::update_value(
            course.id,
            "bbb",
            Some("bbb_record"),
            "0",
            &db,
        )
        .await
        .unwrap();
        assert_eq!(affected, 1);
        let row = CourseSettingRepository::find(course.id, "bbb", None, &db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.value.as_deref(), Some("0"));

        assert_eq!(
            CourseSettingRepository::delete_by_variable(course.id, "bbb", &db)
                .await
                .unwrap(),
            1
        );
        assert!(
            CourseSettingRepository::list_for_course(course.id, &db)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
