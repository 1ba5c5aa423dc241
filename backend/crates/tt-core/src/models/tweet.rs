use crate::Hashtag;

/// An accepted post, staged for fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    /// Monotonic id assigned when the post is staged
    pub id: u64,
    pub sender: String,
    pub body: String,
    /// Validated tags in the order the sender gave them
    pub hashtags: Vec<Hashtag>,
}

impl Tweet {
    pub fn new(id: u64, sender: &str, body: &str, hashtags: Vec<Hashtag>) -> Self {
        Self {
            id,
            sender: String::from(sender),
            body: String::from(body),
            hashtags,
        }
    }

    /// Tag credited to wildcard subscribers.
    pub fn first_hashtag(&self) -> Option<&Hashtag> {
        self.hashtags.first()
    }

    /// `<recipient> <sender>: <body> #<origin>`
    pub fn render_for(&self, recipient: &str, origin: &Hashtag) -> String {
        format!(
            "{recipient} {sender}: {body} {origin}",
            sender = self.sender,
            body = self.body,
            origin = origin.marked()
        )
    }
}
