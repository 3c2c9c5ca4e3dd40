use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Orientation class of a video, used as the first segment of its object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AspectBucket {
    Landscape,
    Portrait,
    Other,
}

impl AspectBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectBucket::Landscape => "landscape",
            AspectBucket::Portrait => "portrait",
            AspectBucket::Other => "other",
        }
    }
}

impl Display for AspectBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
