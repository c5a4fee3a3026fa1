//! Column set shared by every custom field table.
//!
//! Owner specific tables (course fields, user fields ...) call
//! [`create_extra_field_table`] with their own table identifier and add the
//! owner relation on top.

use crate::initializer::table_initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum ExtraField {
    Table,
    Id,
    FieldType,
    FieldVariable,
    FieldDisplayText,
    FieldDefaultValue,
    FieldOrder,
    FieldVisible,
    FieldChangeable,
    FieldFilter,
    Tms,
}

table_initializer!(
    ExtraField,
    name = "extra_field",
    order = super::INIT_EXTRA_FIELD_ORDER,
    create_table = create_base_extra_field_table,
    create_indexes = create_extra_field_indexes,
);

fn create_base_extra_field_table(_: DatabaseBackend) -> TableCreateStatement {
    create_extra_field_table(ExtraField::Table)
}

/// Build the custom field column set for `table`.
pub fn create_extra_field_table<T>(table: T) -> TableCreateStatement
where
    T: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(pk_auto(ExtraField::Id))
        .col(
            ColumnDef::new(ExtraField::FieldType)
                .integer()
                .not_null()
                .comment("Widget type code"),
        )
        .col(
            ColumnDef::new(ExtraField::FieldVariable)
                .string_len(64)
                .not_null(),
        )
        .col(
            ColumnDef::new(ExtraField::FieldDisplayText)
                .string_len(64)
                .null(),
        )
        .col(ColumnDef::new(ExtraField::FieldDefaultValue).text().null())
        .col(ColumnDef::new(ExtraField::FieldOrder).integer().null())
        .col(
            ColumnDef::new(ExtraField::FieldVisible)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ExtraField::FieldChangeable)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ExtraField::FieldFilter)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ExtraField::Tms)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp())
                .comment("Last modified"),
        )
        .to_owned()
}

fn create_extra_field_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_extra_field_variable")
        .table(ExtraField::Table)
        .col(ExtraField::FieldVariable)
        .to_owned()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(DeriveIden)]
    enum CourseField {
        Table,
    }

    #[test]
    fn subtype_tables_share_the_column_set() {
        let base = create_extra_field_table(ExtraField::Table).to_string(SqliteQueryBuilder);
        let course = create_extra_field_table(CourseField::Table).to_string(SqliteQueryBuilder);

        assert!(base.contains("\"extra_field\""));
        assert!(course.contains("\"course_field\""));
        assert_eq!(
            base.replace("\"extra_field\"", ""),
            course.replace("\"course_field\"", "")
        );
    }
}
