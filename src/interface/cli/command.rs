//! CLI 명령 파싱 모듈.
//!
//! clap이 파싱한 값 중 실제로 지정된 것만 `CliArgs`에 담아 해석기로 넘긴다.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::resolver::CliArgs;
use crate::infrastructure::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "agentspace-registrar", version)]
#[command(about = "Manage agents in Agentspace Agent Gallery and Agent Engine")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        long,
        global = true,
        env = "AGENTSPACE_CONFIG",
        default_value = "config.json"
    )]
    config: PathBuf,

    /// Output format for command results
    #[arg(long, global = true, value_enum, default_value_t = OutputArg::Json)]
    output: OutputArg,

    /// Never prompt for missing parameters
    #[arg(long, global = true)]
    no_input: bool,

    /// Enable debug logging on stderr (takes precedence over RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Agent Registry operations (Agentspace Agent Gallery)
    #[command(subcommand)]
    Registry(RegistryCommand),
    /// Agent Engine operations (Vertex AI Agent Engine)
    #[command(subcommand)]
    Engine(EngineCommand),
    /// Authorization operations
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Inspect resolved configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum RegistryCommand {
    /// Create a new agent in the gallery
    Create {
        #[command(flatten)]
        registry: RegistryArgs,
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// List all agents
    List {
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Get a specific agent
    Get {
        /// Agent ID to retrieve
        agent_id: Option<String>,
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Update an existing agent
    Update {
        /// Agent ID to update
        agent_id: Option<String>,
        #[command(flatten)]
        registry: RegistryArgs,
        #[command(flatten)]
        agent: AgentArgs,
        /// Fetch the agent first and prompt for each field, keeping current values by default
        #[arg(long)]
        keep_current: bool,
    },
    /// Find agents by display name
    GetByName {
        /// Display name to search for
        display_name: Option<String>,
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Delete an agent
    Delete {
        /// Agent ID to delete
        agent_id: Option<String>,
        #[command(flatten)]
        registry: RegistryArgs,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
enum EngineCommand {
    /// List all deployed agents
    List {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Get a deployed agent by resource ID or resource name
    Get {
        /// Resource ID of the agent to retrieve
        resource_id: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// List deployed agents by display name
    ListByName {
        /// Display name to search for
        display_name: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Delete a deployed agent
    #[command(alias = "delete")]
    Undeploy {
        /// Full resource name of the agent to delete
        resource_name: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
enum AuthCommand {
    /// Create a new authorization
    Create {
        /// Authorization ID to create (a UUID v4 is generated when omitted)
        authorization_id: Option<String>,
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        oauth: OAuthArgs,
    },
    /// List all authorizations
    List {
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Delete an authorization
    Delete {
        /// Authorization ID to delete
        authorization_id: Option<String>,
        #[command(flatten)]
        auth: AuthArgs,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Replace an authorization by creating a new one and deleting the old one
    Refresh {
        /// Old authorization ID to replace
        old_auth_id: Option<String>,
        /// New authorization ID (a UUID v4 is generated when omitted)
        #[arg(long)]
        new_auth_id: Option<String>,
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        oauth: OAuthArgs,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Show resolved settings and where each value came from
    Show {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        app_id: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Debug, Args)]
struct RegistryArgs {
    /// Google Cloud Project ID
    #[arg(long)]
    project_id: Option<String>,
    /// App ID for the Discovery Engine
    #[arg(long)]
    app_id: Option<String>,
    /// API location [default: global]
    #[arg(long)]
    api_location: Option<String>,
    /// Reasoning Engine location [default: global]
    #[arg(long)]
    re_location: Option<String>,
}

#[derive(Debug, Args)]
struct AgentArgs {
    /// Agent display name
    #[arg(long)]
    display_name: Option<String>,
    /// Agent description
    #[arg(long)]
    description: Option<String>,
    /// Tool description
    #[arg(long)]
    tool_description: Option<String>,
    /// Reasoning Engine ID
    #[arg(long)]
    adk_deployment_id: Option<String>,
    /// Authorization ID
    #[arg(long)]
    auth_id: Option<String>,
    /// Icon URI for the agent
    #[arg(long)]
    icon_uri: Option<String>,
}

#[derive(Debug, Args)]
struct EngineArgs {
    /// Google Cloud Project ID
    #[arg(long)]
    project_id: Option<String>,
    /// Google Cloud Location/Region [default: us-central1]
    #[arg(long)]
    location: Option<String>,
}

#[derive(Debug, Args)]
struct AuthArgs {
    /// Google Cloud Project ID
    #[arg(long)]
    project_id: Option<String>,
    /// Location for authorization [default: us]
    #[arg(long)]
    location: Option<String>,
}

#[derive(Debug, Args)]
struct OAuthArgs {
    /// OAuth scopes (repeatable) [default: email]
    #[arg(long = "scopes", num_args = 1..)]
    scopes: Vec<String>,
    /// OAuth client ID (the secret is read from config or OAUTH_CLIENT_SECRET)
    #[arg(long)]
    oauth_client_id: Option<String>,
}

/// 실행할 명령 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RegistryCreate,
    RegistryList,
    RegistryGet,
    RegistryUpdate { keep_current: bool },
    RegistryGetByName,
    RegistryDelete { force: bool },
    EngineList,
    EngineGet,
    EngineListByName,
    EngineUndeploy { force: bool },
    AuthCreate,
    AuthList,
    AuthDelete { force: bool },
    AuthRefresh,
    ConfigShow,
}

/// 파싱 결과: 전역 옵션, 명령 종류, 명령줄에서 지정된 파라미터 값.
#[derive(Debug, Clone)]
pub struct CliAction {
    pub config_path: PathBuf,
    pub output: OutputFormat,
    pub no_input: bool,
    pub verbose: bool,
    pub command: Command,
    pub args: CliArgs,
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    pub fn into_action(self) -> CliAction {
        let mut args = CliArgs::new();
        let command = match self.command {
            Commands::Registry(command) => registry_action(command, &mut args),
            Commands::Engine(command) => engine_action(command, &mut args),
            Commands::Auth(command) => auth_action(command, &mut args),
            Commands::Config(ConfigCommand::Show {
                project_id,
                app_id,
                location,
            }) => {
                args.set("project_id", project_id)
                    .set("app_id", app_id)
                    .set("location", location);
                Command::ConfigShow
            }
        };

        CliAction {
            config_path: self.config,
            output: match self.output {
                OutputArg::Json => OutputFormat::Json,
                OutputArg::Text => OutputFormat::Text,
            },
            no_input: self.no_input,
            verbose: self.verbose,
            command,
            args,
        }
    }
}

fn registry_action(command: RegistryCommand, args: &mut CliArgs) -> Command {
    match command {
        RegistryCommand::Create { registry, agent } => {
            registry.apply(args);
            agent.apply(args);
            Command::RegistryCreate
        }
        RegistryCommand::List { registry } => {
            registry.apply(args);
            Command::RegistryList
        }
        RegistryCommand::Get { agent_id, registry } => {
            args.set("agent_id", agent_id);
            registry.apply(args);
            Command::RegistryGet
        }
        RegistryCommand::Update {
            agent_id,
            registry,
            agent,
            keep_current,
        } => {
            args.set("agent_id", agent_id);
            registry.apply(args);
            agent.apply(args);
            Command::RegistryUpdate { keep_current }
        }
        RegistryCommand::GetByName {
            display_name,
            registry,
        } => {
            args.set("display_name", display_name);
            registry.apply(args);
            Command::RegistryGetByName
        }
        RegistryCommand::Delete {
            agent_id,
            registry,
            force,
        } => {
            args.set("agent_id", agent_id);
            registry.apply(args);
            Command::RegistryDelete { force }
        }
    }
}

fn engine_action(command: EngineCommand, args: &mut CliArgs) -> Command {
    match command {
        EngineCommand::List { engine } => {
            engine.apply(args);
            Command::EngineList
        }
        EngineCommand::Get {
            resource_id,
            engine,
        } => {
            args.set("resource_id", resource_id);
            engine.apply(args);
            Command::EngineGet
        }
        EngineCommand::ListByName {
            display_name,
            engine,
        } => {
            args.set("re_display_name", display_name);
            engine.apply(args);
            Command::EngineListByName
        }
        EngineCommand::Undeploy {
            resource_name,
            engine,
            force,
        } => {
            args.set("resource_name", resource_name);
            engine.apply(args);
            Command::EngineUndeploy { force }
        }
    }
}

fn auth_action(command: AuthCommand, args: &mut CliArgs) -> Command {
    match command {
        AuthCommand::Create {
            authorization_id,
            auth,
            oauth,
        } => {
            args.set("authorization_id", authorization_id);
            auth.apply(args);
            oauth.apply(args);
            Command::AuthCreate
        }
        AuthCommand::List { auth } => {
            auth.apply(args);
            Command::AuthList
        }
        AuthCommand::Delete {
            authorization_id,
            auth,
            force,
        } => {
            args.set("authorization_id", authorization_id);
            auth.apply(args);
            Command::AuthDelete { force }
        }
        AuthCommand::Refresh {
            old_auth_id,
            new_auth_id,
            auth,
            oauth,
        } => {
            args.set("old_auth_id", old_auth_id)
                .set("new_auth_id", new_auth_id);
            auth.apply(args);
            oauth.apply(args);
            Command::AuthRefresh
        }
    }
}

impl RegistryArgs {
    fn apply(self, args: &mut CliArgs) {
        args.set("project_id", self.project_id)
            .set("app_id", self.app_id)
            .set("api_location", self.api_location)
            .set("re_location", self.re_location);
    }
}

impl AgentArgs {
    fn apply(self, args: &mut CliArgs) {
        args.set("display_name", self.display_name)
            .set("description", self.description)
            .set("tool_description", self.tool_description)
            .set("adk_deployment_id", self.adk_deployment_id)
            .set("auth_id", self.auth_id)
            .set("icon_uri", self.icon_uri);
    }
}

impl EngineArgs {
    fn apply(self, args: &mut CliArgs) {
        args.set("project_id", self.project_id)
            .set("location", self.location);
    }
}

impl AuthArgs {
    fn apply(self, args: &mut CliArgs) {
        args.set("project_id", self.project_id)
            .set("auth_location", self.location);
    }
}

impl OAuthArgs {
    fn apply(self, args: &mut CliArgs) {
        args.set_list("scopes", self.scopes)
            .set("oauth_client_id", self.oauth_client_id);
    }
}
