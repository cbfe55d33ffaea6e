mod create_topic_service;
mod delete_topic_service;
mod get_topic_service;
mod list_topics_service;
mod references;
mod update_topic_service;

pub use create_topic_service::CreateTopicService;
pub use delete_topic_service::DeleteTopicService;
pub use get_topic_service::GetTopicService;
pub use list_topics_service::{ListFirstTopicsService, ListTopicsService};
pub use update_topic_service::UpdateTopicService;
