use campus_error::StorageResult;
use campus_models::{domain::prelude::NewCourseTool, entities::prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Repository for course tool-bar links
pub struct ToolRepository;

impl ToolRepository {
    /// Tool link of a course by name
    pub async fn find_by_name<C>(
        c_id: i32,
        name: &str,
        db: &C,
    ) -> StorageResult<Option<CToolModel>>
    where
        C: ConnectionTrait,
    {
        Ok(CTool::find()
            .filter(CToolColumn::CId.eq(c_id))
            .filter(CToolColumn::Name.eq(name))
            .one(db)
            .await?)
    }

    /// Tool links of a course
    pub async fn list_for_course<C>(c_id: i32, db: &C) -> StorageResult<Vec<CToolModel>>
    where
        C: ConnectionTrait,
    {
        Ok(CTool::find()
            .filter(CToolColumn::CId.eq(c_id))
            .order_by_asc(CToolColumn::Id)
            .all(db)
            .await?)
    }

    /// Next free per-course tool id
    pub async fn next_tool_id<C>(c_id: i32, db: &C) -> StorageResult<i32>
    where
        C: ConnectionTrait,
    {
        let max_id = CTool::find()
            .select_only()
            .column_as(CToolColumn::Id.max(), "max_id")
            .filter(CToolColumn::CId.eq(c_id))
            .into_tuple::<Option<i32>>()
            .one(db)
            .await?
            .flatten();
        Ok(max_id.unwrap_or(0) + 1)
    }

    /// Insert a tool link
    pub async fn insert<C>(tool: NewCourseTool, db: &C) -> StorageResult<CToolModel>
    where
        C: ConnectionTrait,
    {
        Ok(tool.into_active_model().insert(db).await?)
    }

    /// Delete the course tool links named `name`; returns affected rows
    pub async fn delete_by_name<C>(c_id: i32, name: &str, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = CTool::delete_many()
            .filter(CToolColumn::CId.eq(c_id))
            .filter(CToolColumn::Name.eq(name))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
