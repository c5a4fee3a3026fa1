use crate::idens;
use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement, TableDropStatement},
    DatabaseBackend,
};

/// Schema contribution of one table: how to create it, drop it and index it.
pub trait CPInitializer: Send + Sync {
    fn order(&self) -> i32;

    fn name(&self) -> &str;

    fn to_create_table_stmt(&self, backend: DatabaseBackend) -> TableCreateStatement;

    fn to_drop_table_stmt(&self, backend: DatabaseBackend) -> TableDropStatement;

    fn to_create_indexes_stmt(&self, backend: DatabaseBackend)
        -> Option<Vec<IndexCreateStatement>>;
}

/// Implements [`CPInitializer`] for a `DeriveIden` table enum.
macro_rules! table_initializer {
    (
        $iden:ident,
        name = $name:literal,
        order = $order:expr,
        create_table = $create_table:path,
        create_indexes = $create_indexes:path $(,)?
    ) => {
        impl $crate::initializer::CPInitializer for $iden {
            fn order(&self) -> i32 {
                $order
            }

            fn name(&self) -> &str {
                $name
            }

            fn to_create_table_stmt(
                &self,
                backend: sea_orm::DatabaseBackend,
            ) -> sea_orm::sea_query::TableCreateStatement {
                $create_table(backend)
            }

            fn to_drop_table_stmt(
                &self,
                _: sea_orm::DatabaseBackend,
            ) -> sea_orm::sea_query::TableDropStatement {
                sea_orm::sea_query::Table::drop()
                    .table($iden::Table)
                    .if_exists()
                    .to_owned()
            }

            fn to_create_indexes_stmt(
                &self,
                backend: sea_orm::DatabaseBackend,
            ) -> Option<Vec<sea_orm::sea_query::IndexCreateStatement>> {
                $create_indexes(backend)
            }
        }
    };
}

pub(crate) use table_initializer;

pub fn initializers() -> Vec<Box<dyn CPInitializer>> {
    let mut initializers: Vec<Box<dyn CPInitializer>> = vec![
        Box::new(idens::settings_current::SettingsCurrent::Table),
        Box::new(idens::course::Course::Table),
        Box::new(idens::course_setting::CCourseSetting::Table),
        Box::new(idens::c_tool::CTool::Table),
        Box::new(idens::extra_field::ExtraField::Table),
    ];

    initializers.sort_by_key(|init| init.order());
    initializers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializers_are_ordered_and_unique() {
        let inits = initializers();
        let orders: Vec<i32> = inits.iter().map(|i| i.order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);

        let names: Vec<&str> = inits.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "settings_current",
                "course",
                "c_course_setting",
                "c_tool",
                "extra_field"
            ]
        );
    }

    #[test]
    fn every_table_has_indexes() {
        for init in initializers() {
            let stmts = init.to_create_indexes_stmt(DatabaseBackend::Sqlite);
            assert!(stmts.is_some_and(|s| !s.is_empty()), "{}", init.name());
        }
    }
}
