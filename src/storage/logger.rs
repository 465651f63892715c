use std::sync::LazyLock;

use crate::logger::Logger;

pub(crate) static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@qiniu/storage"));
