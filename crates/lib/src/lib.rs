#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod date;
mod fs;
pub mod index;
pub mod metadata;
pub mod post;
pub mod slug;

pub use config::{BlogConfig, ConfigError, SortOrder};
pub use date::{is_valid_date, DateKey, DatePart};
pub use index::{BlogIndex, PageInfo, Paginated, RefreshError, SearchField, Stats};
pub use metadata::{Metadata, MetadataFormat};
pub use post::BlogPost;
pub use slug::slugify;
