pub mod content;
pub mod context;
pub mod engine;
pub mod loader;
pub mod marker;
pub mod popup;
pub mod record_builder;
pub mod row_parser;
pub mod table;

pub use crate::domain::model::{Dataset, LatLng, LoadReport, LocationRecord, MarkerId, RowId};
pub use crate::domain::ports::{ConfigProvider, DatasetSource, MapSurface, PageSurface, Storage};
pub use crate::utils::error::Result;
