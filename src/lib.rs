pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::scene::{SceneMap, ScenePage, SceneSnapshot};
pub use adapters::source::{FileSource, HttpSource};
pub use adapters::storage::LocalStorage;
pub use crate::core::{
    context::{AppContext, RenderOptions, UiEvent},
    engine::MapEngine,
};
pub use utils::error::{MapError, Result};
