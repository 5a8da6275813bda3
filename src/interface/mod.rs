//! Interface layer
//! 사용자 입력(CLI)을 받아 유스케이스를 실행하고 결과를 출력한다.

pub mod cli;
