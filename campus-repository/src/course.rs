use campus_error::StorageResult;
use campus_models::{domain::prelude::NewCourse, entities::prelude::*};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder, QuerySelect,
};

/// Repository for course rows
pub struct CourseRepository;

impl CourseRepository {
    /// Insert a course row
    pub async fn create<C>(course: NewCourse, db: &C) -> StorageResult<CourseModel>
    where
        C: ConnectionTrait,
    {
        Ok(course.into_active_model().insert(db).await?)
    }

    /// All course ids, ascending
    pub async fn list_ids<C>(db: &C) -> StorageResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        Ok(Course::find()
            .select_only()
            .column(CourseColumn::Id)
            .order_by_asc(CourseColumn::Id)
            .into_tuple::<i32>()
            .all(db)
            .await?)
    }
}
