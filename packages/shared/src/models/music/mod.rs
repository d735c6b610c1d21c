use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Track {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl Track {
    /// Title and year identify a track for subscription purposes.
    pub fn same_release(&self, other: &Track) -> bool {
        self.title == other.title && self.year == other.year
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subscription {
    pub uuid: String,
    #[serde(flatten)]
    pub track: Track,
}

/// Free-text query filters. All four are always sent, empty or not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct QueryFilters {
    pub title: String,
    pub year: String,
    pub artist: String,
    pub album: String,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.year.is_empty()
            && self.artist.is_empty()
            && self.album.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscribeRequest {
    pub title: String,
    pub year: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveSubscriptionRequest {
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub success: bool,
    pub results: Option<Vec<Track>>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Option<Vec<Subscription>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub success: bool,
    pub uuid: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoveSubscriptionResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}
