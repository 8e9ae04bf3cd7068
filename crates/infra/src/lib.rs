mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailConfig};
pub use repos::{
    IAssignmentRepo, IReminderRepo, ISendLogRepo, IStudentRepo, KVMetadata, MetadataFindQuery,
    Repos,
};
pub use services::mail::{
    AgentMailTransport, IMailTransport, InMemoryMailTransport, OutboundMessage, SentMessage,
};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct DillContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mail: Arc<dyn IMailTransport>,
    /// Held for the whole of a dispatch run or manual drain, so that two runs
    /// in this process never work on the same reminder at the same time
    pub dispatch_lock: Arc<Mutex<()>>,
}

struct ContextParams {
    // (connection_string, db_name)
    pub mongodb: (String, String),
}

impl DillContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mail: Arc::new(InMemoryMailTransport::new()),
            dispatch_lock: Default::default(),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_mongodb(&params.mongodb.0, &params.mongodb.1)
            .await
            .expect("Mongo db creds must be set and valid");
        let config = Config::new();
        let mail = create_mail_transport(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mail,
            dispatch_lock: Default::default(),
        }
    }
}

fn create_mail_transport(config: &Config) -> Arc<dyn IMailTransport> {
    match &config.mail.agentmail_api_key {
        Some(api_key) => match AgentMailTransport::new(api_key.clone(), &config.mail) {
            Ok(transport) => Arc::new(transport),
            Err(e) => {
                warn!(
                    "Unable to create AgentMail transport, falling back to inmemory mail. Error: {:?}",
                    e
                );
                Arc::new(InMemoryMailTransport::new())
            }
        },
        None => Arc::new(InMemoryMailTransport::new()),
    }
}

/// Will setup the correct Infra Context given the environment
pub async fn setup_context() -> DillContext {
    const MONGODB_CONNECTION_STRING: &str = "MONGODB_CONNECTION_STRING";
    const MONGODB_NAME: &str = "MONGODB_NAME";

    let mongodb_connection_string = std::env::var(MONGODB_CONNECTION_STRING);
    let mongodb_db_name = std::env::var(MONGODB_NAME);

    match (mongodb_connection_string, mongodb_db_name) {
        (Ok(connection_string), Ok(db_name)) => {
            info!(
                "{} and {} env vars was provided. Going to use mongodb.",
                MONGODB_CONNECTION_STRING, MONGODB_NAME
            );
            DillContext::create(ContextParams {
                mongodb: (connection_string, db_name),
            })
            .await
        }
        _ => {
            info!(
                "{} and {} env vars was not provided. Going to use inmemory infra.",
                MONGODB_CONNECTION_STRING, MONGODB_NAME
            );
            let mut ctx = DillContext::create_inmemory();
            ctx.mail = create_mail_transport(&ctx.config);
            ctx
        }
    }
}
