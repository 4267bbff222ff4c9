//! Command construction: canonical settings, the shared argv serializer,
//! immutable command specs, and the generic builder.

pub mod argvec;
pub mod builder;
pub mod settings;
pub mod spec;

pub use builder::CommandBuilder;
pub use settings::{Setting, SettingValue, Settings};
pub use spec::CommandSpec;
