pub mod topic_query;
pub mod topic_repository;

pub use topic_query::{
    SortDirection, TopicListFilter, TopicQuery, TopicQueryError, TopicSort, TopicSortError,
    TopicSortField,
};
pub use topic_repository::{NewTopic, TopicChanges, TopicRepository, TopicRepositoryError};
