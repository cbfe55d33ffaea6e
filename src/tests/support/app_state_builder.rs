use crate::auth::application::use_cases::{
    login_user::ILoginUserUseCase, register_user::IRegisterUserUseCase,
};
use crate::tests::support::stubs::*;
use crate::topic::application::ports::incoming::use_cases::{
    CreateTopicError, CreateTopicUseCase, DeleteTopicUseCase, GetTopicError, GetTopicUseCase,
    ListFirstTopicsUseCase, ListTopicsUseCase, UpdateTopicError, UpdateTopicUseCase,
};
use crate::topic::application::topic_use_cases::TopicUseCases;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

/// Every slot starts with a stub, so a test only overrides what it exercises.
pub struct TestAppStateBuilder {
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    register_user: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    topic: TopicUseCases,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            login_user: Arc::new(StubLoginUserUseCase),
            register_user: Arc::new(StubRegisterUserUseCase),
            topic: TopicUseCases {
                create: Arc::new(StubCreateTopicUseCase(Err(
                    CreateTopicError::RepositoryError("not used in this test".to_string()),
                ))),
                get: Arc::new(StubGetTopicUseCase(Err(GetTopicError::NotFound))),
                list: Arc::new(StubListTopicsUseCase(Ok(vec![]))),
                list_first: Arc::new(StubListTopicsUseCase(Ok(vec![]))),
                update: Arc::new(StubUpdateTopicUseCase(Err(UpdateTopicError::NotFound))),
                delete: Arc::new(StubDeleteTopicUseCase(Ok(()))),
            },
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.register_user = Arc::new(uc);
        self
    }

    pub fn with_create_topic(
        mut self,
        uc: impl CreateTopicUseCase + Send + Sync + 'static,
    ) -> Self {
        self.topic.create = Arc::new(uc);
        self
    }

    pub fn with_get_topic(mut self, uc: impl GetTopicUseCase + Send + Sync + 'static) -> Self {
        self.topic.get = Arc::new(uc);
        self
    }

    pub fn with_list_topics(mut self, uc: impl ListTopicsUseCase + Send + Sync + 'static) -> Self {
        self.topic.list = Arc::new(uc);
        self
    }

    pub fn with_list_first_topics(
        mut self,
        uc: impl ListFirstTopicsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.topic.list_first = Arc::new(uc);
        self
    }

    pub fn with_update_topic(
        mut self,
        uc: impl UpdateTopicUseCase + Send + Sync + 'static,
    ) -> Self {
        self.topic.update = Arc::new(uc);
        self
    }

    pub fn with_delete_topic(
        mut self,
        uc: impl DeleteTopicUseCase + Send + Sync + 'static,
    ) -> Self {
        self.topic.delete = Arc::new(uc);
        self
    }

    /// Replaces all topic use cases at once, e.g. with real services.
    pub fn with_topic_use_cases(mut self, topic: TopicUseCases) -> Self {
        self.topic = topic;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            login_user_use_case: self.login_user,
            register_user_use_case: self.register_user,
            topic: self.topic,
        })
    }
}
