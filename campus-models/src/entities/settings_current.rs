//! `SeaORM` Entity for the platform settings table.
//!
//! One table holds three kinds of rows, told apart by `variable`/`subkey`/`category`:
//! - plugin options (`variable = <plugin>_<option>`, `subkey = <plugin>`, `category = Plugins`)
//! - plugin status (`variable = status`, `subkey = <plugin>`)
//! - navigation tabs (`variable = show_tabs`, `subkey = custom_tab_<n>[::filter]`)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings_current")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub variable: String,
    pub subkey: Option<String>,
    pub setting_type: Option<String>,
    pub category: Option<String>,
    /// Scalar string or a JSON encoded compound value.
    #[sea_orm(column_type = "Text", nullable)]
    pub selected_value: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub subkeytext: Option<String>,
    /// Multi-tenant scope the row belongs to.
    pub access_url: i32,
    pub access_url_changeable: i32,
    pub access_url_locked: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
