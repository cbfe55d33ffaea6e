mod create_topic;
mod delete_topic;
mod dto;
mod get_topic;
mod list_topics;
mod update_topic;

pub use create_topic::{__path_create_topic_handler, create_topic_handler};
pub use delete_topic::{__path_delete_topic_handler, delete_topic_handler};
pub use dto::{ListTopicsQuery, TopicRequestDto, TopicResponse};
pub use get_topic::{__path_get_topic_handler, get_topic_handler};
pub use list_topics::{
    __path_list_first_topics_handler, __path_list_topics_handler, list_first_topics_handler,
    list_topics_handler,
};
pub use update_topic::{__path_update_topic_handler, update_topic_handler};
