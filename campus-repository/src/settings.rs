use campus_error::StorageResult;
use campus_models::{
    constants::{
        CUSTOM_TAB_PREFIX, PLUGINS_CATEGORY, SETTING_TYPE, STATUS_VARIABLE, TABS_VARIABLE,
    },
    domain::prelude::{NewTab, TabUpdate},
    entities::prelude::*,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};

/// Repository for `settings_current` rows: plugin options, plugin status and tabs
pub struct SettingsRepository;

impl SettingsRepository {
    /// All option rows owned by a plugin within one access url, in storage order
    pub async fn find_plugin_settings<C>(
        subkey: &str,
        access_url: i32,
        db: &C,
    ) -> StorageResult<Vec<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Subkey.eq(subkey))
            .filter(SettingsCurrentColumn::Category.eq(PLUGINS_CATEGORY))
            .filter(SettingsCurrentColumn::SettingType.eq(SETTING_TYPE))
            .filter(SettingsCurrentColumn::AccessUrl.eq(access_url))
            .order_by_asc(SettingsCurrentColumn::Id)
            .all(db)
            .await?)
    }

    /// Every row of a category within one access url, regardless of owner
    pub async fn find_by_category<C>(
        category: &str,
        access_url: i32,
        db: &C,
    ) -> StorageResult<Vec<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Category.eq(category))
            .filter(SettingsCurrentColumn::AccessUrl.eq(access_url))
            .order_by_asc(SettingsCurrentColumn::Id)
            .all(db)
            .await?)
    }

    /// Status row of a plugin (any access url)
    pub async fn find_plugin_status<C>(
        subkey: &str,
        db: &C,
    ) -> StorageResult<Option<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::plugin_row(STATUS_VARIABLE, subkey)
            .order_by_asc(SettingsCurrentColumn::Id)
            .one(db)
            .await?)
    }

    /// Set the status row of a plugin, creating it when missing
    pub async fn set_plugin_status<C>(
        subkey: &str,
        status: &str,
        access_url: i32,
        db: &C,
    ) -> StorageResult<SettingsCurrentModel>
    where
        C: ConnectionTrait,
    {
        Self::upsert(STATUS_VARIABLE, subkey, STATUS_VARIABLE, Some(status), access_url, db).await
    }

    /// Write a plugin option, inserting the row on first write
    pub async fn upsert_plugin_setting<C>(
        variable: &str,
        subkey: &str,
        title: &str,
        value: Option<&str>,
        access_url: i32,
        db: &C,
    ) -> StorageResult<SettingsCurrentModel>
    where
        C: ConnectionTrait,
    {
        Self::upsert(variable, subkey, title, value, access_url, db).await
    }

    async fn upsert<C>(
        variable: &str,
        subkey: &str,
        title: &str,
        value: Option<&str>,
        access_url: i32,
        db: &C,
    ) -> StorageResult<SettingsCurrentModel>
    where
        C: ConnectionTrait,
    {
        let existing = Self::plugin_row(variable, subkey)
            .filter(SettingsCurrentColumn::AccessUrl.eq(access_url))
            .one(db)
            .await?;

        match existing {
            Some(model) => {
                let mut active_model: SettingsCurrentActiveModel = model.into();
                active_model.selected_value = Set(value.map(str::to_string));
                Ok(active_model.update(db).await?)
            }
            None => {
                let active_model = SettingsCurrentActiveModel {
                    variable: Set(variable.to_string()),
                    subkey: Set(Some(subkey.to_string())),
                    setting_type: Set(Some(SETTING_TYPE.into())),
                    category: Set(Some(PLUGINS_CATEGORY.into())),
                    selected_value: Set(value.map(str::to_string)),
                    title: Set(title.to_string()),
                    access_url: Set(access_url),
                    access_url_changeable: Set(0),
                    access_url_locked: Set(0),
                    ..Default::default()
                };
                Ok(active_model.insert(db).await?)
            }
        }
    }

    fn plugin_row(variable: &str, subkey: &str) -> Select<SettingsCurrent> {
        SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Variable.eq(variable))
            .filter(SettingsCurrentColumn::Subkey.eq(subkey))
            .filter(SettingsCurrentColumn::Category.eq(PLUGINS_CATEGORY))
            .filter(SettingsCurrentColumn::SettingType.eq(SETTING_TYPE))
    }

    fn custom_tabs() -> Select<SettingsCurrent> {
        SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Variable.eq(TABS_VARIABLE))
            .filter(SettingsCurrentColumn::Subkey.like(format!("{CUSTOM_TAB_PREFIX}%")))
    }

    /// Number of custom navigation tabs
    pub async fn count_custom_tabs<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Self::custom_tabs().count(db).await?)
    }

    /// Custom tabs in storage order
    pub async fn list_custom_tabs<C>(db: &C) -> StorageResult<Vec<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::custom_tabs()
            .order_by_asc(SettingsCurrentColumn::Id)
            .all(db)
            .await?)
    }

    /// Custom tabs other than `key`, in storage order
    pub async fn list_custom_tabs_except<C>(
        key: &str,
        db: &C,
    ) -> StorageResult<Vec<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::custom_tabs()
            .filter(SettingsCurrentColumn::Subkey.ne(key))
            .order_by_asc(SettingsCurrentColumn::Id)
            .all(db)
            .await?)
    }

    /// Tab whose subkey text matches
    pub async fn find_tab_by_subkeytext<C>(
        subkeytext: &str,
        db: &C,
    ) -> StorageResult<Option<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Variable.eq(TABS_VARIABLE))
            .filter(SettingsCurrentColumn::Subkeytext.eq(subkeytext))
            .one(db)
            .await?)
    }

    /// Tab whose title and target url match, as written by a plugin's own tab toggle
    pub async fn find_tab_by_title_and_url<C>(
        title: &str,
        url: &str,
        db: &C,
    ) -> StorageResult<Option<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(SettingsCurrent::find()
            .filter(SettingsCurrentColumn::Variable.eq(TABS_VARIABLE))
            .filter(SettingsCurrentColumn::Title.eq(title))
            .filter(SettingsCurrentColumn::Comment.eq(url))
            .order_by_asc(SettingsCurrentColumn::Id)
            .one(db)
            .await?)
    }

    /// Insert a custom tab row
    pub async fn insert_tab<C>(tab: NewTab, db: &C) -> StorageResult<SettingsCurrentModel>
    where
        C: ConnectionTrait,
    {
        Ok(tab.into_active_model().insert(db).await?)
    }

    /// Delete the tab stored under `key`; returns whether a row was removed
    pub async fn delete_tab<C>(key: &str, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        let result = SettingsCurrent::delete_many()
            .filter(SettingsCurrentColumn::Variable.eq(TABS_VARIABLE))
            .filter(SettingsCurrentColumn::Subkey.eq(key))
            .exec(db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Rename the subkey of the tab with `id`
    pub async fn update_tab_subkey_by_id<C>(id: i32, subkey: &str, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        SettingsCurrent::update_many()
            .col_expr(SettingsCurrentColumn::Subkey, Expr::value(subkey))
            .filter(SettingsCurrentColumn::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Apply a partial update to the tab stored under `key`; returns affected rows
    pub async fn update_tab<C>(key: &str, update: TabUpdate, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        if update.is_empty() {
            return Ok(0);
        }

        let mut query = SettingsCurrent::update_many();
        if let Some(subkey) = update.subkey {
            query = query.col_expr(SettingsCurrentColumn::Subkey, Expr::value(subkey));
        }
        if let Some(title) = update.title {
            query = query.col_expr(SettingsCurrentColumn::Title, Expr::value(title));
        }
        if let Some(url) = update.url {
            query = query.col_expr(SettingsCurrentColumn::Comment, Expr::value(url));
        }
        if let Some(value) = update.selected_value {
            query = query.col_expr(SettingsCurrentColumn::SelectedValue, Expr::value(value));
        }

        let result = query
            .filter(SettingsCurrentColumn::Variable.eq(TABS_VARIABLE))
            .filter(SettingsCurrentColumn::Subkey.eq(key))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_storage::init_memory_db;

    fn tab(n: usize, title: &str) -> NewTab {
        NewTab {
            subkey: format!("custom_tab_{n}"),
            title: title.into(),
            url: format!("plugin/{}/index.php", title.to_lowercase()),
            subkeytext: format!("Tabs{title}"),
        }
    }

    #[tokio::test]
    async fn upsert_writes_once_then_updates() {
        let db = init_memory_db().await.unwrap();

        let first = SettingsRepository::upsert_plugin_setting(
            "bbb_host",
            "bbb",
            "host",
            Some("a"),
            1,
            &db,
        )
        .await
        .unwrap();
        let second = SettingsRepository::upsert_plugin_setting(
            "bbb_host",
            "bbb",
            "host",
            Some("b"),
            1,
            &db,
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        let rows = SettingsRepository::find_plugin_settings("bbb", 1, &db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].selected_value.as_deref(), Some("b"));
        assert!(SettingsRepository::find_plugin_settings("bbb", 2, &db)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn tab_queries_only_see_custom_tabs() {
        let db = init_memory_db().await.unwrap();
        SettingsRepository::insert_tab(tab(1, "Alpha"), &db)
            .await
            .unwrap();
        SettingsRepository::insert_tab(tab(2, "Beta"), &db)
            .await
            .unwrap();
        SettingsRepository::insert_tab(
            NewTab {
                subkey: "campus_homepage".into(),
                ..tab(0, "Home")
            },
            &db,
        )
        .await
        .unwrap();

        assert_eq!(SettingsRepository::count_custom_tabs(&db).await.unwrap(), 2);
        let others = SettingsRepository::list_custom_tabs_except("custom_tab_1", &db)
            .await
            .unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].title, "Beta");

        let found = SettingsRepository::find_tab_by_subkeytext("TabsAlpha", &db)
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn update_tab_touches_only_given_columns() {
        let db = init_memory_db().await.unwrap();
        SettingsRepository::insert_tab(tab(1, "Alpha"), &db)
            .await
            .unwrap();

        let affected = SettingsRepository::update_tab(
            "custom_tab_1",
            TabUpdate {
                subkey: Some("custom_tab_1::no-student".into()),
                ..Default::default()
            },
            &db,
        )
        .await
        .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(
            SettingsRepository::update_tab("custom_tab_1", TabUpdate::default(), &db)
                .await
                .unwrap(),
            0
        );

        let tabs = SettingsRepository::list_custom_tabs(&db).await.unwrap();
        assert_eq!(tabs[0].subkey.as_deref(), Some("custom_tab_1::no-student"));
        assert_eq!(tabs[0].title, "Alpha");
        assert!(SettingsRepository::delete_tab("custom_tab_1::no-student", &db)
            .await
            .unwrap());
        assert!(!SettingsRepository::delete_tab("custom_tab_1::no-student", &db)
            .await
            .unwrap());
    }
}
