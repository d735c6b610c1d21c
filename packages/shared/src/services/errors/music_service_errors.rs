#[derive(Debug, PartialEq, Eq)]
pub enum MusicServiceError {
    EmptyFilters,
    NoResults,
    QueryFailed,
    AlreadySubscribed { title: String, year: String },
    SubscribeFailed,
    NoSubscriptions,
    FetchSubscriptionsFailed,
    RemoveFailed,
}

impl std::fmt::Display for MusicServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MusicServiceError::EmptyFilters => write!(f, "Please fill in at least one field."),
            MusicServiceError::NoResults => {
                write!(f, "No result is retrieved. Please query again.")
            }
            MusicServiceError::QueryFailed => {
                write!(f, "Failed to retrieve results. Please try again.")
            }
            MusicServiceError::AlreadySubscribed { title, year } => {
                write!(f, "You have already subscribed to {} ({})", title, year)
            }
            MusicServiceError::SubscribeFailed => {
                write!(f, "Failed to subscribe. Please try again.")
            }
            MusicServiceError::NoSubscriptions => write!(f, "No subscriptions found."),
            MusicServiceError::FetchSubscriptionsFailed => {
                write!(f, "Failed to fetch subscriptions.")
            }
            MusicServiceError::RemoveFailed => write!(f, "Failed to remove subscription."),
        }
    }
}

impl std::error::Error for MusicServiceError {}
