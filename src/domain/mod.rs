//! Domain layer
//! 파라미터 해석 규칙, 서비스 설정, 요청 본문 규칙을 외부 의존성 없이 표현한다.

pub mod agent;
pub mod authorization;
pub mod engine;
pub mod parameter;
pub mod settings;
