//! Google Cloud REST API 연동 구현.
//!
//! - `registry`: Discovery Engine 갤러리 에이전트
//! - `engine`: Vertex AI reasoning engine(배포 레지스트리)
//! - `authorization`: Discovery Engine OAuth authorization

mod authorization;
mod engine;
mod registry;
mod transport;

pub use authorization::{AuthorizationClient, authorizations_url};
pub use engine::{ReasoningEngineClient, reasoning_engine_url, reasoning_engines_url};
pub use registry::{AgentRegistryClient, agents_url};
pub use transport::{ApiTransport, build_api_client};
