use super::timestamps::iso_local;
use crate::models::{Conversation, MessageRow};

/// Flattens a conversation into one row per `user`/`assistant` message, in mapping order
///
/// `time` is the local ISO-8601 form of `create_time`, empty when absent or not
/// representable. Messages with other roles are skipped.
pub fn extract_messages(conversation: &Conversation) -> Vec<MessageRow> {
    let conversation_id = conversation.id_cell();
    let title = conversation.title_cell();

    conversation
        .messages()
        .filter(|message| message.role().is_conversational())
        .map(|message| MessageRow {
            conversation_id: conversation_id.clone(),
            title: title.clone(),
            time: message.create_time().and_then(iso_local).unwrap_or_default(),
            role: message.role().as_str().to_string(),
            text: message.content().text(),
        })
        .collect()
}
