use crate::initializer::table_initializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden)]
pub enum SettingsCurrent {
    Table,
    Id,
    Variable,
    Subkey,
    SettingType,
    Category,
    SelectedValue,
    Title,
    Comment,
    Subkeytext,
    AccessUrl,
    AccessUrlChangeable,
    AccessUrlLocked,
}

table_initializer!(
    SettingsCurrent,
    name = "settings_current",
    order = super::INIT_SETTINGS_ORDER,
    create_table = create_settings_current_table,
    create_indexes = create_settings_current_indexes,
);

fn create_settings_current_table(_: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(SettingsCurrent::Table)
        .if_not_exists()
        .col(pk_auto(SettingsCurrent::Id))
        .col(
            ColumnDef::new(SettingsCurrent::Variable)
                .string_len(255)
                .not_null()
                .comment("Setting name, `<plugin>_<option>` for plugin options"),
        )
        .col(ColumnDef::new(SettingsCurrent::Subkey).string_len(255).null())
        .col(ColumnDef::new(SettingsCurrent::SettingType).string_len(255).null())
        .col(ColumnDef::new(SettingsCurrent::Category).string_len(255).null())
        .col(
            ColumnDef::new(SettingsCurrent::SelectedValue)
                .text()
                .null()
                .comment("Scalar or JSON encoded compound value"),
        )
        .col(
            ColumnDef::new(SettingsCurrent::Title)
                .string_len(255)
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(SettingsCurrent::Comment).text().null())
        .col(ColumnDef::new(SettingsCurrent::Subkeytext).string_len(255).null())
        .col(
            ColumnDef::new(SettingsCurrent::AccessUrl)
                .integer()
                .not_null()
                .default(1)
                .comment("Multi-tenant scope id"),
        )
        .col(
            ColumnDef::new(SettingsCurrent::AccessUrlChangeable)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(SettingsCurrent::AccessUrlLocked)
                .integer()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn create_settings_current_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("idx_settings_current_variable_subkey")
            .table(SettingsCurrent::Table)
            .col(SettingsCurrent::Variable)
            .col(SettingsCurrent::Subkey)
            .to_owned(),
        Index::create()
            .name("idx_settings_current_access_url")
            .table(SettingsCurrent::Table)
            .col(SettingsCurrent::AccessUrl)
            .to_owned(),
    ])
}
