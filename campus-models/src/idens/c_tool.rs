use crate::initializer::table_initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum CTool {
    Table,
    Iid,
    Id,
    CId,
    Name,
    Link,
    Image,
    Visibility,
    Admin,
    Address,
    AddedTool,
    Target,
    Category,
    SessionId,
}

table_initializer!(
    CTool,
    name = "c_tool",
    order = super::INIT_TOOL_ORDER,
    create_table = create_tool_table,
    create_indexes = create_tool_indexes,
);

fn create_tool_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(CTool::Table)
        .if_not_exists()
        .col(pk_auto(CTool::Iid))
        .col(
            ColumnDef::new(CTool::Id)
                .integer()
                .not_null()
                .comment("Sequence local to the course"),
        )
        .col(ColumnDef::new(CTool::CId).integer().not_null())
        .col(ColumnDef::new(CTool::Name).string_len(255).not_null())
        .col(ColumnDef::new(CTool::Link).string_len(255).not_null())
        .col(ColumnDef::new(CTool::Image).string_len(255).null())
        .col(
            ColumnDef::new(CTool::Visibility)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(CTool::Admin).string_len(255).null())
        .col(ColumnDef::new(CTool::Address).string_len(255).null())
        .col(
            ColumnDef::new(CTool::AddedTool)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(CTool::Target)
                .string_len(20)
                .not_null()
                .default("_self"),
        )
        .col(ColumnDef::new(CTool::Category).string_len(20).not_null())
        .col(
            ColumnDef::new(CTool::SessionId)
                .integer()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn create_tool_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("uk_c_tool_course_name")
        .table(CTool::Table)
        .col(CTool::CId)
        .col(CTool::Name)
        .unique()
        .to_owned()])
}
