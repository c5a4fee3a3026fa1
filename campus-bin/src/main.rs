use campus_common::CPAppContext;
use campus_error::{CPError, CPResult};
use campus_models::constants::DEFAULT_CONFIG_FILE_NAME;
use campus_plugin::{ManifestPlugin, PluginContext, PluginEnv, SettingValue};
use campus_storage::CPDbManager;
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use std::{collections::BTreeMap, env::current_dir, path::PathBuf};
use tracing::info;

/// Campus plugin administration
///
/// Manages plugin settings, course installation and navigation tabs of
/// plugins declared by a `plugin.json` manifest under the plugin directory.
#[derive(Parser)]
#[command(name = "campus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Campus plugin administration", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, 'campus.toml' in the current working directory is used.
    #[arg(short, long, env = "CP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Migrate,
    /// Print plugin information as JSON
    Info { plugin: String },
    /// Read or write a global plugin setting
    #[command(subcommand)]
    Setting(SettingCommand),
    /// Install or remove a plugin's course settings and tool link
    #[command(subcommand)]
    Course(CourseCommand),
    /// Show or hide a plugin's navigation tab
    #[command(subcommand)]
    Tab(TabCommand),
}

#[derive(Subcommand)]
enum SettingCommand {
    Get {
        plugin: String,
        option: String,
    },
    Set {
        plugin: String,
        option: String,
        /// Plain text, or a JSON array / object
        value: String,
    },
}

#[derive(Subcommand)]
enum CourseCommand {
    Install {
        plugin: String,
        /// Only this course; every course when omitted
        #[arg(long)]
        course: Option<i32>,
        /// Do not add a link on the course home page
        #[arg(long)]
        no_tool_link: bool,
    },
    Uninstall {
        plugin: String,
        #[arg(long)]
        course: Option<i32>,
    },
}

#[derive(Subcommand)]
enum TabCommand {
    Show {
        plugin: String,
        /// Page the tab points to, relative to the plugin directory
        #[arg(long, default_value = "index.php")]
        path: String,
    },
    Hide {
        plugin: String,
        #[arg(long, default_value = "index.php")]
        path: String,
    },
}

async fn load_plugin(
    app: &CPAppContext<CPDbManager>,
    name: &str,
) -> CPResult<PluginContext<ManifestPlugin>> {
    let env = PluginEnv::from_settings(app.settings());
    let plugin = ManifestPlugin::load(&env.plugin_root, name).await?;
    Ok(PluginContext::new(plugin, env))
}

async fn run(
    command: Command,
    app: &CPAppContext<CPDbManager>,
    db: &DatabaseConnection,
) -> CPResult<()> {
    match command {
        Command::Migrate => info!("Database schema is up to date"),
        Command::Info { plugin } => {
            let mut ctx = load_plugin(app, &plugin).await?;
            let info = ctx.get_info(db).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Setting(SettingCommand::Get { plugin, option }) => {
            let mut ctx = load_plugin(app, &plugin).await?;
            match ctx.get(db, &option).await? {
                Some(value) => println!("{}", value.encode()),
                None => {
                    return Err(CPError::from(format!(
                        "{plugin} has no setting named {option}"
                    )))
                }
            }
        }
        Command::Setting(SettingCommand::Set {
            plugin,
            option,
            value,
        }) => {
            let ctx = load_plugin(app, &plugin).await?;
            let values = BTreeMap::from([(option.clone(), SettingValue::decode(&value))]);
            if ctx.save_settings(db, &values).await? == 0 {
                return Err(CPError::from(format!(
                    "{plugin} does not declare a setting named {option}"
                )));
            }
        }
        Command::Course(CourseCommand::Install {
            plugin,
            course,
            no_tool_link,
        }) => {
            let ctx = load_plugin(app, &plugin).await?;
            match course {
                Some(course_id) => {
                    let install = ctx
                        .install_course_fields(db, course_id, !no_tool_link)
                        .await?;
                    println!("{}", serde_json::to_string_pretty(&install)?);
                }
                None => {
                    let courses = ctx
                        .install_course_fields_in_all_courses(db, !no_tool_link)
                        .await?;
                    println!("installed in {courses} courses");
                }
            }
        }
        Command::Course(CourseCommand::Uninstall { plugin, course }) => {
            let ctx = load_plugin(app, &plugin).await?;
            match course {
                Some(course_id) => {
                    let uninstall = ctx.uninstall_course_fields(db, course_id).await?;
                    println!("{}", serde_json::to_string_pretty(&uninstall)?);
                }
                None => {
                    let courses = ctx.uninstall_course_fields_in_all_courses(db).await?;
                    println!("uninstalled from {courses} courses");
                }
            }
        }
        Command::Tab(TabCommand::Show { plugin, path }) => {
            let ctx = load_plugin(app, &plugin).await?;
            let outcome = ctx.manage_tab(db, true, &path).await?;
            if outcome.requires_reload() {
                println!("tab added, reload the platform pages to see it");
            } else {
                println!("tab already present");
            }
        }
        Command::Tab(TabCommand::Hide { plugin, path }) => {
            let ctx = load_plugin(app, &plugin).await?;
            println!("{:?}", ctx.manage_tab(db, false, &path).await?);
        }
    }
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> CPResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| CPError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    let app = CPAppContext::<CPDbManager>::init(config_path.to_string_lossy().to_string()).await?;
    let db = app.connection()?;

    let result = run(cli.command, &app, &db).await;
    app.shutdown().await?;
    result
}
