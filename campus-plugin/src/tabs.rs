use crate::{context::PluginContext, Plugin};
use campus_error::CPResult;
use campus_models::{
    constants::{CUSTOM_TAB_PREFIX, TAB_SUBKEYTEXT_PREFIX},
    domain::prelude::{NewTab, TabUpdate},
    entities::prelude::SettingsCurrentModel,
    enums::setting::TabUserFilter,
};
use campus_repository::SettingsRepository;
use sea_orm::ConnectionTrait;
use tracing::{info, instrument};

/// What [`PluginContext::manage_tab`] did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManageTabOutcome {
    /// The tab was created; the page showing the menu must be reloaded
    Added(SettingsCurrentModel),
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl ManageTabOutcome {
    #[inline]
    pub fn requires_reload(&self) -> bool {
        matches!(self, ManageTabOutcome::Added(_))
    }
}

fn tab_subkey(slot: u64, filter: Option<TabUserFilter>) -> String {
    format!(
        "{CUSTOM_TAB_PREFIX}{slot}{}",
        filter.map(|f| f.suffix()).unwrap_or_default()
    )
}

impl<P: Plugin> PluginContext<P> {
    /// Add a custom navigation tab in the next free slot.
    ///
    /// Returns `None` when a tab with the same whitespace-free name exists.
    #[instrument(name = "plugin-add-tab", skip_all)]
    pub async fn add_tab<C>(
        &self,
        db: &C,
        name: &str,
        url: &str,
        filter: Option<TabUserFilter>,
    ) -> CPResult<Option<SettingsCurrentModel>>
    where
        C: ConnectionTrait,
    {
        let subkeytext = format!(
            "{TAB_SUBKEYTEXT_PREFIX}{}",
            name.split_whitespace().collect::<String>()
        );
        if SettingsRepository::find_tab_by_subkeytext(&subkeytext, db)
            .await?
            .is_some()
        {
            info!(plugin = self.name(), tab = name, "Tab already exists");
            return Ok(None);
        }

        let slot = SettingsRepository::count_custom_tabs(db).await? + 1;
        let tab = SettingsRepository::insert_tab(
            NewTab {
                subkey: tab_subkey(slot, filter),
                title: name.to_string(),
                url: url.to_string(),
                subkeytext,
            },
            db,
        )
        .await?;
        info!(plugin = self.name(), tab = name, slot, "Tab added");
        Ok(Some(tab))
    }

    /// Delete the tab stored under `key` and renumber the remaining custom
    /// tabs from 1 in storage order, keeping their student filters.
    #[instrument(name = "plugin-delete-tab", skip_all)]
    pub async fn delete_tab<C>(&self, db: &C, key: &str) -> CPResult<bool>
    where
        C: ConnectionTrait,
    {
        if key.is_empty() {
            return Ok(false);
        }

        let others = SettingsRepository::list_custom_tabs_except(key, db).await?;
        let deleted = SettingsRepository::delete_tab(key, db).await?;

        for (slot, row) in (1..).zip(others) {
            let current = row.subkey.unwrap_or_default();
            let subkey = tab_subkey(slot, TabUserFilter::from_subkey(&current));
            if subkey != current {
                SettingsRepository::update_tab_subkey_by_id(row.id, &subkey, db).await?;
            }
        }

        info!(plugin = self.name(), tab = key, deleted, "Tab deleted");
        Ok(deleted)
    }

    /// Partial update of the tab stored under `key`; returns affected rows
    pub async fn update_tab<C>(&self, db: &C, key: &str, update: TabUpdate) -> CPResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(SettingsRepository::update_tab(key, update, db).await?)
    }

    /// Show or hide the plugin's own tab, linking to `plugin/<name>/<file_path>`.
    pub async fn manage_tab<C>(
        &self,
        db: &C,
        show: bool,
        file_path: &str,
    ) -> CPResult<ManageTabOutcome>
    where
        C: ConnectionTrait,
    {
        let title = self.camel_case_name();
        let url = format!("plugin/{}/{file_path}", self.name());

        if show {
            return Ok(match self.add_tab(db, title, &url, None).await? {
                Some(tab) => ManageTabOutcome::Added(tab),
                None => ManageTabOutcome::AlreadyPresent,
            });
        }

        let subkey = SettingsRepository::find_tab_by_title_and_url(title, &url, db)
            .await?
            .and_then(|tab| tab.subkey);
        match subkey {
            Some(key) => {
                self.delete_tab(db, &key).await?;
                Ok(ManageTabOutcome::Removed)
            }
            None => Ok(ManageTabOutcome::NotPresent),
        }
    }
}
