use crate::api::client::SnowClient;
use crate::cli::command_handlers::{ConnectHandler, RecordsHandler, SchemaHandler};
use crate::cli::main_types::Commands;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use std::path::PathBuf;

/// Per-invocation context: where the config lives and how chatty to be
pub struct Dispatcher {
    config_path: Option<PathBuf>,
    verbose: bool,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config_path,
            verbose,
        }
    }

    // Saved credentials are required by every command except connect
    fn create_client(&self) -> Result<SnowClient, AppError> {
        let config = Config::load(self.config_path.clone())?;
        self.log_verbose(&format!(
            "Loaded config for instance {} as {}",
            config.instance, config.username
        ));
        SnowClient::from_config(&config)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Connect(args) => {
                let handler = ConnectHandler::new();
                handler
                    .handle(args, self.config_path.clone(), self.verbose)
                    .await
            }
            Commands::Schema(args) => {
                let handler = SchemaHandler::new();
                let client = self.create_client()?;
                handler.handle(args, client, self.verbose).await
            }
            Commands::Records(args) => {
                let handler = RecordsHandler::new();
                let client = self.create_client()?;
                handler.handle(args, client, self.verbose).await
            }
        }
    }
}
