use crate::{APIResponse, BaseClient};
use dill_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SummaryClient {
    base: Arc<BaseClient>,
}

impl SummaryClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn send_daily(&self) -> APIResponse<send_daily_summaries::APIResponse> {
        self.base
            .post((), "summaries/send".into(), StatusCode::OK)
            .await
    }
}
