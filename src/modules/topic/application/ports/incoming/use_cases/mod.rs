mod create_topic_use_case;
mod delete_topic_use_case;
mod get_topic_use_case;
mod list_topics_use_case;
mod topic_command;
mod update_topic_use_case;

pub use create_topic_use_case::{CreateTopicError, CreateTopicUseCase};
pub use delete_topic_use_case::{DeleteTopicError, DeleteTopicUseCase};
pub use get_topic_use_case::{GetTopicError, GetTopicUseCase};
pub use list_topics_use_case::{
    ListFirstTopicsUseCase, ListTopicsError, ListTopicsUseCase, FIRST_TOPICS_LIMIT,
};
pub use topic_command::{TopicCommand, TopicCommandError, MAX_TITLE_LENGTH};
pub use update_topic_use_case::{UpdateTopicError, UpdateTopicUseCase};
