/// One summarized post, exactly as produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub score: i64,
    pub comments: u64,
    pub url: String,
    pub author: String,
    pub subreddit: String,
}

/// Posts sharing one source subreddit, in the order the backend sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubredditGroup {
    pub subreddit: String,
    pub posts: Vec<Post>,
    /// Set when the backend could not read this subreddit.
    pub error: Option<String>,
}

/// The complete dashboard payload. Replaced wholesale, never merged.
pub type SummarySet = Vec<SubredditGroup>;
