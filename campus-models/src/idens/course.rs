use crate::initializer::table_initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum Course {
    Table,
    Id,
    Code,
    Title,
}

table_initializer!(
    Course,
    name = "course",
    order = super::INIT_COURSE_ORDER,
    create_table = create_course_table,
    create_indexes = create_course_indexes,
);

fn create_course_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Course::Table)
        .if_not_exists()
        .col(pk_auto(Course::Id))
        .col(
            ColumnDef::new(Course::Code)
                .string_len(40)
                .not_null()
                .comment("Course code"),
        )
        .col(ColumnDef::new(Course::Title).string_len(250).not_null())
        .to_owned()
}

fn create_course_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("uk_course_code")
        .table(Course::Table)
        .col(Course::Code)
        .unique()
        .to_owned()])
}
