use anyhow::Result;

use crate::config::AppConfig;
use crate::context::Context;
use crate::forwarder::Forwarder;
use crate::store::SubmissionStore;

pub struct GlobalState {
    pub config: AppConfig,
    pub ctx: Context,
    pub forwarder: Forwarder,
    pub store: SubmissionStore,
}

impl GlobalState {
    pub fn new(config: AppConfig, ctx: Context) -> Result<Self> {
        let forwarder = Forwarder::new(&config.webhook)?;
        let store = SubmissionStore::new(&config.data_dir);

        Ok(Self {
            config,
            ctx,
            forwarder,
            store,
        })
    }
}
