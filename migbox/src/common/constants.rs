/// Name the box source registers under in a [`crate::source::DriverRegistry`].
pub const BOX_DRIVER_NAME: &str = "box";

/// Separator between a driver name and its location in a source URL.
pub const URL_SCHEME_SEPARATOR: &str = "://";

/// Separator used for box file names, independent of the host platform.
pub const BOX_PATH_SEPARATOR: char = '/';

/// File name suffix keyword for migrations applied when upgrading.
pub const UP_KEYWORD: &str = "up";

/// File name suffix keyword for migrations applied when rolling back.
pub const DOWN_KEYWORD: &str = "down";
