use std::sync::Arc;

use crate::topic::application::ports::incoming::use_cases::{
    CreateTopicUseCase, DeleteTopicUseCase, GetTopicUseCase, ListFirstTopicsUseCase,
    ListTopicsUseCase, UpdateTopicUseCase,
};

#[derive(Clone)]
pub struct TopicUseCases {
    pub create: Arc<dyn CreateTopicUseCase + Send + Sync>,
    pub get: Arc<dyn GetTopicUseCase + Send + Sync>,
    pub list: Arc<dyn ListTopicsUseCase + Send + Sync>,
    pub list_first: Arc<dyn ListFirstTopicsUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateTopicUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteTopicUseCase + Send + Sync>,
}
