use crate::initializer::table_initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

/// Per-course settings. No unique key on (c_id, variable, subkey):
/// writers check for an existing row before inserting.
#[derive(DeriveIden)]
pub enum CCourseSetting {
    Table,
    Id,
    CId,
    Variable,
    Subkey,
    SettingType,
    Category,
    Value,
    Title,
}

table_initializer!(
    CCourseSetting,
    name = "c_course_setting",
    order = super::INIT_COURSE_SETTING_ORDER,
    create_table = create_course_setting_table,
    create_indexes = create_course_setting_indexes,
);

fn create_course_setting_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(CCourseSetting::Table)
        .if_not_exists()
        .col(pk_auto(CCourseSetting::Id))
        .col(
            ColumnDef::new(CCourseSetting::CId)
                .integer()
                .not_null()
                .comment("Course id"),
        )
        .col(
            ColumnDef::new(CCourseSetting::Variable)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(CCourseSetting::Subkey).string_len(255).null())
        .col(
            ColumnDef::new(CCourseSetting::SettingType)
                .string_len(255)
                .not_null(),
        )
        .col(
            ColumnDef::new(CCourseSetting::Category)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(CCourseSetting::Value).text().null())
        .col(
            ColumnDef::new(CCourseSetting::Title)
                .string_len(255)
                .not_null()
                .default(""),
        )
        .to_owned()
}

fn create_course_setting_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_c_course_setting_course_variable")
        .table(CCourseSetting::Table)
        .col(CCourseSetting::CId)
        .col(CCourseSetting::Variable)
        .to_owned()])
}
