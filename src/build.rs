mod builder;
mod content;
mod document;
mod head;
mod highlight;
mod markdown;
mod nav;
mod og;
mod paths;
mod plugins;
mod render;
mod search;
mod watch;

pub use builder::{BuildError, BuildResult, Builder};
pub use paths::base_path_from_config;
pub use watch::{ChangeKind, FileWatcher, PathClassifier, WatchEvent, WatchPaths};
