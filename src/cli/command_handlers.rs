use crate::api::client::SnowClient;
use crate::cli::main_types::{ConnectArgs, RecordsArgs, SchemaArgs};
use crate::core::auth::LoginInput;
use crate::core::services::auth_service::AuthService;
use crate::core::services::record_service::{RecordQuery, RecordService};
use crate::core::services::schema_service::SchemaService;
use crate::display::{OperationStatus, ProgressSpinner, TableDisplay, display_status};
use crate::error::{AppError, CliError};
use crate::export::SchemaCsvExporter;
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_scope;
use std::path::PathBuf;

#[derive(Default)]
pub struct ConnectHandler;

impl ConnectHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: ConnectArgs,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting connect command");

        let input = LoginInput::from_args_or_prompt(args.instance, args.username, args.password)?;
        let mut service = AuthService::from_login(&input, config_path)?;
        print_verbose(
            verbose,
            &format!("Authenticating against {}", service.client().base_url),
        );

        let mut spinner = ProgressSpinner::new(format!("Connecting to {}...", input.instance));
        spinner.start();

        match service.connect().await {
            Ok(user) => {
                spinner.stop(Some("✅ Connected successfully"));
                println!("\nConnection Details:");
                println!("===================");
                println!("  Instance: {}", service.client().base_url);
                println!("  User: {}", user.user_id);
                println!("  Name: {}", user.name);
                println!("  Email: {}", user.email);
                println!("\nCredentials saved.");
                Ok(())
            }
            Err(e) => {
                spinner.stop(Some("❌ Connection failed"));
                Err(e)
            }
        }
    }
}

#[derive(Default)]
pub struct SchemaHandler;

impl SchemaHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: SchemaArgs,
        client: SnowClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        validate_scope(&args.scope)?;
        if args.concurrency == 0 {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "--concurrency must be at least 1".to_string(),
            )));
        }

        print_verbose(
            verbose,
            &format!(
                "Attempting schema export - scope: {}, detailed: {}, concurrency: {}",
                args.scope, args.detailed, args.concurrency
            ),
        );

        let service = SchemaService::new(&client).with_concurrency(args.concurrency);

        println!("Fetching tables for scope: {}...", args.scope);
        let tables = service.get_tables(&args.scope, args.detailed).await?;

        println!("Found {} tables, fetching relationships...", tables.len());
        let relationships = service.get_relationships(&tables).await?;
        print_verbose(
            verbose,
            &format!("Derived {} relationships", relationships.len()),
        );

        SchemaCsvExporter::new(args.detailed).export_to_path(
            &args.output,
            &tables,
            &relationships,
        )?;

        display_status(
            &format!("Successfully exported schema to {}", args.output.display()),
            OperationStatus::Success,
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordsHandler;

impl RecordsHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: RecordsArgs,
        client: SnowClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(
            verbose,
            &format!(
                "Attempting records fetch - table: {}, limit: {}, query: {:?}",
                args.table, args.limit, args.query
            ),
        );

        let params = RecordQuery {
            table: args.table,
            limit: args.limit,
            query: args.query,
        };

        let mut spinner = ProgressSpinner::new(format!("Fetching {} records...", params.table));
        spinner.start();
        let result = RecordService::new(&client).fetch_records(&params).await;
        spinner.stop(None);

        let records = result?;
        let display = TableDisplay::new().with_max_cell_width(args.max_width);
        println!("{}", display.render_records(&records));
        Ok(())
    }
}
