use std::sync::Arc;
use std::time::Duration;

use crate::callback::CallbackDispatcher;
use crate::config::Config;
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::orchestrator::TaskOrchestrator;
use crate::translate::TranslationRequester;

#[derive(Clone)]
pub struct AppState {
    pub requester: Arc<TranslationRequester>,
    pub orchestrator: Arc<TaskOrchestrator>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config)?;
        Self::with_llm(config, llm)
    }

    /// Builds the state around an already constructed provider client.
    pub fn with_llm(config: &Config, llm: Arc<dyn StatelessLLMInterface>) -> anyhow::Result<Self> {
        let requester = Arc::new(TranslationRequester::new(llm));
        let dispatcher = Arc::new(CallbackDispatcher::new(Duration::from_secs(
            config.callback_config.timeout_secs,
        ))?);
        let orchestrator = Arc::new(TaskOrchestrator::new(
            requester.clone(),
            dispatcher,
            config.callback_config.start_message.clone(),
        ));

        Ok(Self {
            requester,
            orchestrator,
        })
    }
}
