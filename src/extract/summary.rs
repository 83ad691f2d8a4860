use crate::models::Conversation;

/// Index statistics for one conversation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConversationSummary {
    /// Number of `user` and `assistant` messages
    pub message_count: usize,
    /// Earliest `create_time` over all messages, any role
    pub first_time: Option<f64>,
    /// Latest `create_time` over all messages, any role
    pub last_time: Option<f64>,
}

/// Counts conversational messages and finds the time range of a conversation
///
/// Mapping order does not matter: the count is a sum and the times are a min/max.
pub fn summarize(conversation: &Conversation) -> ConversationSummary {
    conversation.messages().fold(ConversationSummary::default(), |mut acc, message| {
        if message.role().is_conversational() {
            acc.message_count += 1;
        }
        if let Some(ts) = message.create_time() {
            acc.first_time = Some(acc.first_time.map_or(ts, |first| first.min(ts)));
            acc.last_time = Some(acc.last_time.map_or(ts, |last| last.max(ts)));
        }
        acc
    })
}
