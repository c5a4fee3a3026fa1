use crate::{context::PluginContext, Plugin};
use campus_error::{plugin::PluginError, CPResult};
use campus_models::{
    constants::COURSE_PLUGINS_CATEGORY,
    domain::prelude::{NewCourseSetting, NewCourseTool},
    entities::prelude::CToolModel,
};
use campus_repository::{CourseRepository, CourseSettingRepository, ToolRepository};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Result of installing a plugin into one course
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CourseInstall {
    /// Course setting rows written by this call
    pub inserted: usize,
    /// Tool-bar link of the plugin, existing or new
    pub tool: Option<CToolModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CourseUninstall {
    pub settings_removed: u64,
    pub tools_removed: u64,
}

fn check_course_id(course_id: i32) -> Result<(), PluginError> {
    if course_id <= 0 {
        return Err(PluginError::InvalidCourseId(course_id));
    }
    Ok(())
}

impl<P: Plugin> PluginContext<P> {
    #[inline]
    pub async fn course_install<C>(
        &self,
        db: &C,
        course_id: i32,
        add_tool_link: bool,
    ) -> CPResult<CourseInstall>
    where
        C: ConnectionTrait,
    {
        self.install_course_fields(db, course_id, add_tool_link).await
    }

    /// Add the declared course settings that are still missing, then the
    /// tool-bar link unless `add_tool_link` or the plugin says otherwise.
    ///
    /// Statements run one by one; pass a transaction for atomicity.
    #[instrument(name = "plugin-course-install", skip_all, fields(course_id = course_id))]
    pub async fn install_course_fields<C>(
        &self,
        db: &C,
        course_id: i32,
        add_tool_link: bool,
    ) -> CPResult<CourseInstall>
    where
        C: ConnectionTrait,
    {
        check_course_id(course_id)?;
        let name = self.name();
        let mut install = CourseInstall::default();

        for spec in &self.plugin().descriptor().course_settings {
            let (variable, subkey, exists) = match &spec.group {
                Some(group) => (
                    group.as_str(),
                    spec.name.as_str(),
                    CourseSettingRepository::exists(course_id, group, Some(&spec.name), db)
                        .await?,
                ),
                None => (
                    spec.name.as_str(),
                    name,
                    CourseSettingRepository::exists(course_id, &spec.name, None, db).await?,
                ),
            };
            if exists {
                debug!(plugin = name, variable, subkey, "Course setting already present");
                continue;
            }

            CourseSettingRepository::insert(
                NewCourseSetting {
                    c_id: course_id,
                    variable: variable.to_string(),
                    subkey: Some(subkey.to_string()),
                    setting_type: spec.setting_type.clone(),
                    category: COURSE_PLUGINS_CATEGORY.into(),
                    value: Some(spec.init_value.clone().unwrap_or_default()),
                },
                db,
            )
            .await?;
            install.inserted += 1;
        }

        if add_tool_link && self.plugin().descriptor().flags.add_course_tool {
            install.tool = self
                .create_link_to_course_tool(db, name, course_id, None, None)
                .await?;
        }

        info!(plugin = name, inserted = install.inserted, "Installed course fields");
        Ok(install)
    }

    /// Remove the declared course settings and the plugin's tool-bar link.
    #[instrument(name = "plugin-course-uninstall", skip_all, fields(course_id = course_id))]
    pub async fn uninstall_course_fields<C>(
        &self,
        db: &C,
        course_id: i32,
    ) -> CPResult<CourseUninstall>
    where
        C: ConnectionTrait,
    {
        check_course_id(course_id)?;
        let name = self.name();
        let mut uninstall = CourseUninstall::default();

        for spec in &self.plugin().descriptor().course_settings {
            let variable = spec.variable();
            if variable.is_empty() {
                continue;
            }
            uninstall.settings_removed +=
                CourseSettingRepository::delete_by_variable(course_id, variable, db).await?;
        }
        uninstall.tools_removed = ToolRepository::delete_by_name(course_id, name, db).await?;

        info!(
            plugin = name,
            settings = uninstall.settings_removed,
            tools = uninstall.tools_removed,
            "Uninstalled course fields"
        );
        Ok(uninstall)
    }

    /// Tool-bar link `name` of a course, created when missing. Default link
    /// and icon are `<plugin>/start.php` and `<plugin>.png`.
    pub async fn create_link_to_course_tool<C>(
        &self,
        db: &C,
        name: &str,
        course_id: i32,
        icon: Option<&str>,
        link: Option<&str>,
    ) -> CPResult<Option<CToolModel>>
    where
        C: ConnectionTrait,
    {
        if !self.plugin().descriptor().flags.add_course_tool {
            return Ok(None);
        }
        check_course_id(course_id)?;

        if let Some(tool) = ToolRepository::find_by_name(course_id, name, db).await? {
            return Ok(Some(tool));
        }

        let plugin = self.name();
        let tool = ToolRepository::insert(
            NewCourseTool {
                id: ToolRepository::next_tool_id(course_id, db).await?,
                c_id: course_id,
                name: name.to_string(),
                link: link.map_or_else(|| format!("{plugin}/start.php"), str::to_string),
                image: icon.map_or_else(|| format!("{plugin}.png"), str::to_string),
            },
            db,
        )
        .await?;
        debug!(plugin, course_id, tool = tool.id, "Created course tool link");
        Ok(Some(tool))
    }

    /// Install into every course, in ascending id order; stops at the first error.
    pub async fn install_course_fields_in_all_courses<C>(
        &self,
        db: &C,
        add_tool_link: bool,
    ) -> CPResult<usize>
    where
        C: ConnectionTrait,
    {
        let ids = CourseRepository::list_ids(db).await?;
        for course_id in &ids {
            self.install_course_fields(db, *course_id, add_tool_link).await?;
        }
        Ok(ids.len())
    }

    pub async fn uninstall_course_fields_in_all_courses<C>(&self, db: &C) -> CPResult<usize>
    where
        C: ConnectionTrait,
    {
        let ids = CourseRepository::list_ids(db).await?;
        for course_id in &ids {
            self.uninstall_course_fields(db, *course_id).await?;
        }
        Ok(ids.len())
    }

    /// Variables the plugin owns on the course settings page
    pub fn get_course_settings(&self) -> Vec<String> {
        let mut settings: Vec<String> = Vec::new();
        for spec in &self.plugin().descriptor().course_settings {
            let variable = spec.variable();
            if !settings.iter().any(|s| s == variable) {
                settings.push(variable.to_string());
            }
        }
        settings
    }

    /// Store submitted course setting values, keyed by setting name.
    ///
    /// Values the plugin rejects through `validate_course_setting` are
    /// skipped; returns the number of rows updated.
    pub async fn save_course_settings<C>(
        &self,
        db: &C,
        course_id: i32,
        values: &BTreeMap<String, String>,
    ) -> CPResult<u64>
    where
        C: ConnectionTrait,
    {
        check_course_id(course_id)?;
        let descriptor = self.plugin().descriptor();
        let mut updated = 0;

        for spec in &descriptor.course_settings {
            let Some(value) = values.get(&spec.name) else {
                continue;
            };
            if !self.plugin().validate_course_setting(&spec.name) {
                debug!(plugin = self.name(), setting = %spec.name, "Course setting rejected");
                continue;
            }
            let subkey = spec.group.as_ref().map(|_| spec.name.as_str());
            updated += CourseSettingRepository::update_value(
                course_id,
                spec.variable(),
                subkey,
                value,
                db,
            )
            .await?;
        }

        if descriptor.flags.course_settings_callback {
            self.plugin().course_settings_updated(course_id, values).await?;
        }
        Ok(updated)
    }
}
